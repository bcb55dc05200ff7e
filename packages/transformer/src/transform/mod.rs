//! Transformation Engine
//!
//! Rewrites marker-typed component signatures into body-level service resolution.
//! Every change is a span edit against the original text, so untouched text is kept
//! byte for byte and already-transformed output has nothing left to rewrite.

pub mod src {
    pub mod bindings;
    pub mod edits;
    pub mod engine;
    pub mod imports;
    pub mod result;
}

pub use src::bindings::*;
pub use src::edits::*;
pub use src::engine::*;
pub use src::imports::*;
pub use src::result::*;

#[cfg(test)]
mod test;
