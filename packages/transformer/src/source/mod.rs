//! Source Units
//!
//! Parsing and the read-only views over an oxc `Program` shared by the catalog, the
//! detector and the engine.

pub mod src {
    pub mod function_like;
    pub mod local_types;
    pub mod type_names;
    pub mod unit;
}

pub use src::function_like::*;
pub use src::local_types::*;
pub use src::type_names::*;
pub use src::unit::*;
