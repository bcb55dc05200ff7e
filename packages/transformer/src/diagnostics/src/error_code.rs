use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    /// A source unit could not be parsed. Fatal for that file only.
    ParseError = 1001,
    /// A source provider could not read a file.
    ReadError = 1002,
    /// Rewritten text or the generated module could not be written.
    WriteError = 1003,

    /// Several non-primary, unqualified classes implement the same interface.
    AmbiguousImplementation = 2001,
    /// More than one class claims to be the primary implementation of an interface.
    MultiplePrimaryImplementations = 2002,

    /// An interface referenced by a component has no registered implementation.
    MissingImplementation = 3001,
    /// A component references an interface the catalog does not know at transform time.
    UnresolvedInterface = 3002,

    NoInjectionMarkers = 4001,
    /// The type argument of a marker is not a plain interface reference,
    /// e.g. `Inject<A | B>` or `Inject<() => void>`.
    UnresolvableMarkerArgument = 4002,
    MixedServicesObject = 4003,
    BindingNameCollision = 4004,
    TransformationRuntime = 4005,
}

impl ErrorCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Diagnostics render their code with a `DI` prefix, e.g. `DI4001`.
pub fn di_error_code(code: ErrorCode) -> String {
    format!("DI{}", code.as_u32())
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", di_error_code(*self))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&di_error_code(*self))
    }
}
