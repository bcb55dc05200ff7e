//! Injection Markers
//!
//! Recognizes `Inject<I>` and `InjectOptional<I>` in parameter types, object type
//! members and same-file prop interfaces.

pub mod src {
    pub mod detector;
    pub mod marker;
}

pub use src::detector::*;
pub use src::marker::*;
