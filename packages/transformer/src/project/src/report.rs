use crate::configuration::ConfigurationArtifact;
use crate::diagnostics::Diagnostic;
use crate::source::SourceUnit;
use crate::transform::TransformationResult;
use serde::Serialize;

/// Units a provider could read, plus one diagnostic per file it could not.
#[derive(Debug, Clone, Default)]
pub struct LoadedUnits {
    pub units: Vec<SourceUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Everything a full build produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    /// Read, scan and write diagnostics.
    pub diagnostics: Vec<Diagnostic>,
    pub files: Vec<TransformationResult>,
    pub artifact: ConfigurationArtifact,
    /// Paths written through the provider, artifact last.
    pub written: Vec<String>,
}

impl BuildReport {
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .chain(self.files.iter().flat_map(|f| f.diagnostics()))
            .chain(self.artifact.diagnostics.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.all_diagnostics().any(|d| d.is_error())
    }

    pub fn transformed_components(&self) -> usize {
        self.files.iter().map(|f| f.stats.transformed_components).sum()
    }
}
