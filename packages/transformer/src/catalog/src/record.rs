use super::scope::LifecycleScope;
use crate::file_system::strip_extension;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NON_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

/// Replace every character that cannot appear in an identifier with `_`.
pub fn sanitize(value: &str) -> String {
    NON_IDENTIFIER.replace_all(value, "_").to_string()
}

/// Stable token for an (interface, implementation file) pair, e.g.
/// `Logger__src_services_ConsoleLogger`.
pub fn make_token(interface_name: &str, source_file_path: &str) -> String {
    format!(
        "{}__{}",
        sanitize(interface_name),
        sanitize(&strip_extension(source_file_path))
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationKind {
    /// Listed in the class's `implements` clause.
    Interface,
    /// The class's `extends` target.
    BaseClass,
    /// The class's own name.
    SelfClass,
}

/// A marker-typed constructor parameter of an implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorDependency {
    /// Position in the constructor's parameter list.
    pub index: usize,
    pub parameter_name: String,
    pub interface_name: String,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationRecord {
    pub implementation_class_name: String,
    pub interface_name: String,
    pub source_file_path: String,
    pub scope: LifecycleScope,
    pub is_primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    pub is_generic: bool,
    pub type_parameters: Vec<String>,
    pub sanitized_token: String,
    pub constructor_dependencies: Vec<ConstructorDependency>,
    pub registration: RegistrationKind,
}

impl ImplementationRecord {
    pub fn new(
        implementation_class_name: impl Into<String>,
        interface_name: impl Into<String>,
        source_file_path: impl Into<String>,
    ) -> Self {
        let interface_name = interface_name.into();
        let source_file_path = source_file_path.into();
        Self {
            implementation_class_name: implementation_class_name.into(),
            sanitized_token: make_token(&interface_name, &source_file_path),
            interface_name,
            source_file_path,
            scope: LifecycleScope::default(),
            is_primary: false,
            qualifier: None,
            is_generic: false,
            type_parameters: Vec::new(),
            constructor_dependencies: Vec::new(),
            registration: RegistrationKind::Interface,
        }
    }

    pub fn with_scope(mut self, scope: LifecycleScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    pub fn with_qualifier(mut self, qualifier: Option<String>) -> Self {
        self.qualifier = qualifier;
        self
    }

    /// Key under which the record is reachable in the qualified index.
    pub fn qualified_key(&self) -> Option<String> {
        self.qualifier
            .as_ref()
            .map(|q| qualified_key(&self.interface_name, q))
    }

    pub fn describe(&self) -> String {
        format!("{} ({})", self.implementation_class_name, self.source_file_path)
    }
}

pub fn qualified_key(interface_name: &str, qualifier: &str) -> String {
    format!("{}#{}", interface_name, qualifier)
}
