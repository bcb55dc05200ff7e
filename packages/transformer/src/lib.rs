#![deny(clippy::all)]

/**
 * DI Transformer - Rust Implementation
 *
 * Source-to-source dependency injection for TypeScript components
 */
pub mod catalog;
pub mod configuration;
pub mod diagnostics;
pub mod extractor;
pub mod file_system;
pub mod logging;
pub mod markers;
pub mod options;
pub mod project;
pub mod source;
pub mod transform;

pub use catalog::{scan, ImplementationRecord, InterfaceCatalog, LifecycleScope};
pub use configuration::{collect_used_interfaces, generate, ConfigurationArtifact};
pub use diagnostics::{Diagnostic, DiagnosticCategory, ErrorCode, TransformError};
pub use options::TransformerOptions;
pub use project::Project;
pub use source::SourceUnit;
pub use transform::{transform, TransformationResult, Transformer};

/// Transformer version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
