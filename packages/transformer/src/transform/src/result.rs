use crate::diagnostics::Diagnostic;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationStats {
    pub transformed_components: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Outcome of transforming one file. `success` is false if any function (or the
/// file itself) reported an error; `transformed_code` still carries whatever could
/// be rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationResult {
    pub success: bool,
    pub file_name: String,
    pub transformed_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
    pub stats: TransformationStats,
}

impl TransformationResult {
    pub fn new(
        file_name: impl Into<String>,
        transformed_code: String,
        warnings: Vec<Diagnostic>,
        errors: Vec<Diagnostic>,
        transformed_components: usize,
    ) -> Self {
        let stats = TransformationStats {
            transformed_components,
            errors: errors.len(),
            warnings: warnings.len(),
        };
        Self {
            success: errors.is_empty(),
            file_name: file_name.into(),
            transformed_code,
            error: errors.first().map(|e| e.message_text.clone()),
            warnings,
            errors,
            stats,
        }
    }

    /// The file could not be processed at all; its text is returned unchanged.
    pub fn failed(file_name: impl Into<String>, original: &str, error: Diagnostic) -> Self {
        Self::new(file_name, original.to_string(), Vec::new(), vec![error], 0)
    }

    pub fn has_changes(&self) -> bool {
        self.stats.transformed_components > 0
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
