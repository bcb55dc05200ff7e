//! File System Abstraction
//!
//! The catalog and the engine only see [`SourceUnit`](crate::source::SourceUnit)s;
//! where they come from (disk or memory) is decided by a [`SourceProvider`].

pub mod src;


pub use src::*;
