use crate::diagnostics::TransformError;
use crate::source::SourceUnit;

/// Supplies the units of a project and accepts rewritten text for a path.
pub trait SourceProvider: Send + Sync {
    /// Every unit of the project. A file that cannot be read yields an `Err` entry
    /// and does not prevent the others from loading.
    fn source_units(&self) -> Vec<Result<SourceUnit, TransformError>>;

    fn write(&self, path: &str, text: &str) -> Result<(), TransformError>;
}
