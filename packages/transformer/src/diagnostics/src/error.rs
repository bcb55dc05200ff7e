use super::diagnostic::Diagnostic;
use super::error_code::ErrorCode;
use std::io;
use thiserror::Error;

/// Internal failures raised while scanning or rewriting a unit. They never cross the
/// batch boundary: the catalog, the engine and the generator convert them into
/// [`Diagnostic`]s scoped to the file or function that produced them.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("binding `{name}` would be declared more than once in `{function}`")]
    BindingCollision { function: String, name: String },

    #[error("overlapping edits at {start}..{end} in `{function}`")]
    OverlappingEdits {
        function: String,
        start: u32,
        end: u32,
    },

    #[error("cannot rewrite `{function}`: {reason}")]
    Unsupported { function: String, reason: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl TransformError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TransformError::Parse { .. } => ErrorCode::ParseError,
            TransformError::Read { .. } => ErrorCode::ReadError,
            TransformError::Write { .. } => ErrorCode::WriteError,
            TransformError::BindingCollision { .. } => ErrorCode::BindingNameCollision,
            TransformError::OverlappingEdits { .. } | TransformError::Unsupported { .. } => {
                ErrorCode::TransformationRuntime
            }
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code(), self.to_string())
    }
}
