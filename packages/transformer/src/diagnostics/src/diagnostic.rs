use super::error_code::ErrorCode;
use oxc_span::Span;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A structured report attached to a transformation result, a catalog scan or a
/// generated configuration. Positions are byte offsets into the original text,
/// `line`/`column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: ErrorCode,
    pub file: Option<String>,
    pub start: Option<u32>,
    pub length: Option<u32>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub message_text: String,
}

impl Diagnostic {
    pub fn new(category: DiagnosticCategory, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            file: None,
            start: None,
            length: None,
            line: None,
            column: None,
            message_text: message.into(),
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Error, code, message)
    }

    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Warning, code, message)
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Anchor the diagnostic to `span` within `text`.
    pub fn at(mut self, text: &str, span: Span) -> Self {
        let (line, column) = line_and_column(text, span.start);
        self.start = Some(span.start);
        self.length = Some(span.end.saturating_sub(span.start));
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    pub fn is_warning(&self) -> bool {
        self.category == DiagnosticCategory::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line, self.column) {
            (Some(file), Some(line), Some(column)) => write!(f, "{}:{}:{} - ", file, line, column)?,
            (Some(file), _, _) => write!(f, "{} - ", file)?,
            _ => {}
        }
        write!(f, "{} {}: {}", self.category, self.code, self.message_text)
    }
}

/// 1-based line and column (in chars) of a byte offset.
pub fn line_and_column(text: &str, offset: u32) -> (u32, u32) {
    let offset = (offset as usize).min(text.len());
    let prefix = text.get(..offset).unwrap_or(text);
    let line = prefix.matches('\n').count() as u32 + 1;
    let line_start = prefix.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let column = prefix[line_start..].chars().count() as u32 + 1;
    (line, column)
}
