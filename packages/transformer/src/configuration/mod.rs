//! Configuration Generator
//!
//! Cross-references the interfaces components ask for with the catalog and emits the
//! module the runtime container is configured from.

pub mod src {
    pub mod artifact;
    pub mod generator;
    pub mod render;
    pub mod usage;
}

pub use src::artifact::*;
pub use src::generator::*;
pub use src::usage::*;
