use super::record::{qualified_key, ImplementationRecord};
use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::options::AmbiguityPolicy;
use indexmap::IndexMap;
use serde::Serialize;

/// A class seen implementing an interface, whether or not it won the registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub class_name: String,
    pub source_file_path: String,
}

/// Interface name to implementation, rebuilt from scratch on every scan and
/// published as an immutable snapshot.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceCatalog {
    records: IndexMap<String, ImplementationRecord>,
    qualified: IndexMap<String, ImplementationRecord>,
    implementations: IndexMap<String, Vec<Candidate>>,
    diagnostics: Vec<Diagnostic>,
}

impl InterfaceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `record` under its interface name, resolving conflicts with an
    /// existing record by primary flag, qualifier and `policy`.
    pub fn register(&mut self, record: ImplementationRecord, policy: AmbiguityPolicy) {
        let interface = record.interface_name.clone();

        let candidates = self.implementations.entry(interface.clone()).or_default();
        let candidate = Candidate {
            class_name: record.implementation_class_name.clone(),
            source_file_path: record.source_file_path.clone(),
        };
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }

        if let Some(key) = record.qualified_key() {
            self.qualified.insert(key, record);
            return;
        }

        let Some(existing) = self.records.get(&interface) else {
            self.records.insert(interface, record);
            return;
        };

        let replace = match (existing.is_primary, record.is_primary) {
            (false, true) => true,
            (true, false) => false,
            (true, true) => {
                let diagnostic = Diagnostic::error(
                    ErrorCode::MultiplePrimaryImplementations,
                    format!(
                        "Interface `{}` has more than one primary implementation: {} and {}",
                        interface,
                        existing.describe(),
                        record.describe()
                    ),
                )
                .in_file(&record.source_file_path);
                self.diagnostics.push(diagnostic);
                policy == AmbiguityPolicy::LastRegisteredWins
            }
            (false, false) => {
                let keep_last = policy == AmbiguityPolicy::LastRegisteredWins;
                let chosen = if keep_last { &record } else { existing };
                let names = self
                    .implementations_of(&interface)
                    .iter()
                    .map(|c| format!("{} ({})", c.class_name, c.source_file_path))
                    .collect::<Vec<_>>()
                    .join(", ");
                let diagnostic = Diagnostic::warning(
                    ErrorCode::AmbiguousImplementation,
                    format!(
                        "Interface `{}` has several implementations and none is primary: {}. Using `{}`",
                        interface, names, chosen.implementation_class_name
                    ),
                )
                .in_file(&record.source_file_path);
                self.diagnostics.push(diagnostic);
                keep_last
            }
        };

        if replace {
            self.records.insert(interface, record);
        }
    }

    /// The record serving `interface_name`. When only qualified implementations
    /// exist and there is exactly one of them, that one serves the bare name too.
    pub fn lookup(&self, interface_name: &str) -> Option<&ImplementationRecord> {
        if let Some(record) = self.records.get(interface_name) {
            return Some(record);
        }
        let mut qualified = self
            .qualified
            .values()
            .filter(|r| r.interface_name == interface_name);
        match (qualified.next(), qualified.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    pub fn lookup_qualified(&self, interface_name: &str, qualifier: &str) -> Option<&ImplementationRecord> {
        self.qualified.get(&qualified_key(interface_name, qualifier))
    }

    /// Qualified implementations of `interface_name` as `(qualifier, record)`, in scan
    /// order.
    pub fn qualified_of(&self, interface_name: &str) -> Vec<(&str, &ImplementationRecord)> {
        self.qualified
            .values()
            .filter(|r| r.interface_name == interface_name)
            .filter_map(|r| r.qualifier.as_deref().map(|q| (q, r)))
            .collect()
    }

    pub fn token_for(&self, interface_name: &str) -> Option<&str> {
        self.lookup(interface_name).map(|r| r.sanitized_token.as_str())
    }

    /// Every class seen implementing `interface_name`, in scan order.
    pub fn implementations_of(&self, interface_name: &str) -> &[Candidate] {
        self.implementations
            .get(interface_name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Winning unqualified records in registration order.
    pub fn records(&self) -> impl Iterator<Item = &ImplementationRecord> {
        self.records.values()
    }

    pub fn qualified_records(&self) -> impl Iterator<Item = (&str, &ImplementationRecord)> {
        self.qualified.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(|k| k.as_str())
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.qualified.is_empty()
    }
}
