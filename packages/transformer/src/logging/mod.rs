//! Logging
//!
//! The scan/transform/generate functions never log; they return diagnostics. The
//! project pipeline takes an explicit [`Logger`] handle chosen by the embedder.

pub mod src {
    pub mod logger;
    pub mod tracing_logger;
}

pub use src::logger::*;
pub use src::tracing_logger::*;
