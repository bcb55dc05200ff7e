//! Transformer Options
//!
//! Loaded from `di.config.json`; every field has a default so an empty object (or
//! no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::catalog::LifecycleScope;

pub const DEFAULT_CONFIG_FILE: &str = "di.config.json";

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("failed to read options file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// What to do when several unqualified, non-primary classes implement one interface.
/// The condition is always reported; the policy only picks the surviving record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AmbiguityPolicy {
    #[default]
    LastRegisteredWins,
    FirstRegisteredWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerNames {
    pub inject: String,
    pub inject_optional: String,
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self {
            inject: "Inject".to_string(),
            inject_optional: "InjectOptional".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeNames {
    /// Module the resolution primitives are imported from.
    pub module: String,
    pub required: String,
    pub optional: String,
    /// Type of the container argument of generated factories.
    pub container: String,
}

impl Default for RuntimeNames {
    fn default() -> Self {
        Self {
            module: "@di-transformer/runtime".to_string(),
            required: "useService".to_string(),
            optional: "useOptionalService".to_string(),
            container: "DIContainer".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecoratorNames {
    /// Class decorators that make a class an injectable candidate.
    pub service: Vec<String>,
    pub primary: String,
    pub scope: String,
    pub qualifier: String,
}

impl Default for DecoratorNames {
    fn default() -> Self {
        Self {
            service: vec!["Service".to_string(), "Injectable".to_string()],
            primary: "Primary".to_string(),
            scope: "Scope".to_string(),
            qualifier: "Qualifier".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformerOptions {
    pub root_dir: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Where transformed files are written. `None` rewrites in place.
    pub out_dir: Option<String>,
    /// Path of the generated configuration module, relative to `root_dir`.
    pub config_output: String,
    pub markers: MarkerNames,
    pub runtime: RuntimeNames,
    pub decorators: DecoratorNames,
    pub default_scope: LifecycleScope,
    pub ambiguity_policy: AmbiguityPolicy,
    /// Register `class A extends B` under `B` as well as its interfaces.
    pub register_base_classes: bool,
}

impl Default for TransformerOptions {
    fn default() -> Self {
        Self {
            root_dir: ".".to_string(),
            include: vec!["src/**/*.ts".to_string(), "src/**/*.tsx".to_string()],
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/*.d.ts".to_string(),
                "**/*.test.ts".to_string(),
                "**/*.test.tsx".to_string(),
            ],
            out_dir: None,
            config_output: "src/.di/di-config.ts".to_string(),
            markers: MarkerNames::default(),
            runtime: RuntimeNames::default(),
            decorators: DecoratorNames::default(),
            default_scope: LifecycleScope::Singleton,
            ambiguity_policy: AmbiguityPolicy::default(),
            register_base_classes: true,
        }
    }
}

impl TransformerOptions {
    pub fn from_json(content: &str, path: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(content).map_err(|source| OptionsError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let display = path.to_string_lossy().to_string();
        let content = fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&content, &display)
    }

    /// Load `path` when given, otherwise `di.config.json` in the working directory if
    /// present, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, OptionsError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let candidate = Path::new(DEFAULT_CONFIG_FILE);
                if candidate.exists() {
                    Self::load(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn is_service_decorator(&self, name: &str) -> bool {
        self.decorators.service.iter().any(|s| s == name)
    }
}
