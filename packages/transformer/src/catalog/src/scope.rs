use serde::{Deserialize, Serialize};
use std::fmt;

/// Instance lifetime requested by an implementation. The container enforces it; the
/// transformer only records and forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleScope {
    #[default]
    Singleton,
    Transient,
    Scoped,
}

impl LifecycleScope {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "singleton" => Some(LifecycleScope::Singleton),
            "transient" => Some(LifecycleScope::Transient),
            "scoped" => Some(LifecycleScope::Scoped),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleScope::Singleton => "singleton",
            LifecycleScope::Transient => "transient",
            LifecycleScope::Scoped => "scoped",
        }
    }
}

impl fmt::Display for LifecycleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
