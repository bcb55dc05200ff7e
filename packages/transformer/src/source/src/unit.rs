use crate::diagnostics::TransformError;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};
use serde::{Deserialize, Serialize};

/// One source file of a project, identified by its (real or virtual) path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub path: String,
    pub text: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn parse<'a>(&'a self, allocator: &'a Allocator) -> Result<Program<'a>, TransformError> {
        parse_source(allocator, &self.text, &self.path)
    }
}

/// Unknown extensions are parsed as TSX.
pub fn source_type_for(file_name: &str) -> SourceType {
    SourceType::from_path(file_name).unwrap_or_else(|_| SourceType::tsx())
}

/// Parse `text` into a fresh program. Any syntax error makes the whole unit fail.
pub fn parse_source<'a>(
    allocator: &'a Allocator,
    text: &'a str,
    file_name: &str,
) -> Result<Program<'a>, TransformError> {
    let ret = Parser::new(allocator, text, source_type_for(file_name)).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(TransformError::Parse {
            file: file_name.to_string(),
            message,
        });
    }

    Ok(ret.program)
}

pub fn slice(text: &str, span: Span) -> &str {
    text.get(span.start as usize..span.end as usize).unwrap_or("")
}
