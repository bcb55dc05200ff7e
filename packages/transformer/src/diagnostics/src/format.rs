use super::diagnostic::Diagnostic;

/// Format diagnostics one per line, errors first, keeping the relative order of
/// each category.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let errors = diagnostics.iter().filter(|d| d.is_error());
    let rest = diagnostics.iter().filter(|d| !d.is_error());
    errors
        .chain(rest)
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn count_errors(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

pub fn count_warnings(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_warning()).count()
}
