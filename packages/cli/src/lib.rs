#![deny(clippy::all)]

/**
 * DI Transformer CLI
 *
 * Commands behind the `ditc` binary
 */
pub mod commands;
pub mod config;

pub use commands::*;
pub use config::*;
