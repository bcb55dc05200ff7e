//! Project Pipeline
//!
//! Scan, transform and generate over every unit a [`SourceProvider`](crate::file_system::SourceProvider)
//! supplies.

pub mod src {
    pub mod project;
    pub mod report;
}

pub use src::project::*;
pub use src::report::*;

#[cfg(test)]
mod test;
