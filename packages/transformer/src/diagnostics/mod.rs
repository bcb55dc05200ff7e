pub mod src {
    pub mod diagnostic;
    pub mod error;
    pub mod error_code;
    pub mod format;
}

pub use src::diagnostic::*;
pub use src::error::*;
pub use src::error_code::*;
pub use src::format::*;

#[cfg(test)]
mod test;
