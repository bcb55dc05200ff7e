//! Dependency Extractor
//!
//! Normalizes the marker sites of one function into dependency descriptors and a plan
//! of which signature pieces carry them.

pub mod src {
    pub mod descriptor;
    pub mod extract;
}

pub use src::descriptor::*;
pub use src::extract::*;
