use crate::catalog::{LifecycleScope, RegistrationKind};
use crate::diagnostics::Diagnostic;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntry {
    pub class_name: String,
    /// Name the class is bound to in the generated module.
    pub local_name: String,
    pub module_specifier: String,
    pub source_file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FactoryArgument {
    Resolve { token: String, optional: bool },
    /// Constructor position without an injectable type, or whose interface has no
    /// implementation.
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryDefinition {
    pub name: String,
    pub class_local_name: String,
    pub arguments: Vec<FactoryArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEntry {
    pub token: String,
    pub interface_name: String,
    pub implementation_class_name: String,
    pub source_file_path: String,
    pub scope: LifecycleScope,
    pub factory: String,
    pub registration: RegistrationKind,
    /// Set for entries reachable only as `Interface#qualifier`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

/// Everything the generated configuration module contains, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationArtifact {
    pub output_path: String,
    pub runtime_module: String,
    pub container_type: String,
    pub imports: Vec<ImportEntry>,
    pub factories: Vec<FactoryDefinition>,
    pub token_table: BTreeMap<String, TokenEntry>,
    pub class_tokens: BTreeMap<String, String>,
    pub interface_implementations: BTreeMap<String, Vec<String>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ConfigurationArtifact {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Token serving the bare `interface_name`, if it was emitted.
    pub fn token_of(&self, interface_name: &str) -> Option<&str> {
        self.token_table
            .values()
            .find(|e| e.interface_name == interface_name && e.qualifier.is_none())
            .map(|e| e.token.as_str())
    }

    /// Token of the `qualifier` implementation of `interface_name`.
    pub fn qualified_token_of(&self, interface_name: &str, qualifier: &str) -> Option<&str> {
        self.token_table
            .values()
            .find(|e| e.interface_name == interface_name && e.qualifier.as_deref() == Some(qualifier))
            .map(|e| e.token.as_str())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
