//! Symbol/Interface Catalog
//!
//! Scans source units for injectable classes and maps every interface they implement
//! to the implementation that serves it.

pub mod src {
    pub mod annotation;
    pub mod interface_catalog;
    pub mod record;
    pub mod scanner;
    pub mod scope;
}

pub use src::annotation::*;
pub use src::interface_catalog::*;
pub use src::record::*;
pub use src::scanner::*;
pub use src::scope::*;

#[cfg(test)]
mod test;
