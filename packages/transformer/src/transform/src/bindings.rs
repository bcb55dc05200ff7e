use super::imports::{quote, CallNames, UsedPrimitives};
use crate::catalog::InterfaceCatalog;
use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::extractor::{DependencyDescriptor, ExtractionOutcome};
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());
static SIMPLE_EXPRESSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_$.]+$").unwrap());

enum Value {
    Call(String),
    Object(Vec<(String, Value)>),
}

impl Value {
    fn render(&self, spread: Option<&str>) -> String {
        match self {
            Value::Call(call) => call.clone(),
            Value::Object(entries) => {
                let mut parts = Vec::new();
                if let Some(base) = spread {
                    parts.push(format!("...{}", base));
                }
                for (key, value) in entries {
                    parts.push(format!("{}: {}", object_key(key), value.render(None)));
                }
                if parts.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", parts.join(", "))
                }
            }
        }
    }
}

fn object_key(key: &str) -> String {
    if IDENTIFIER.is_match(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn insert(entries: &mut Vec<(String, Value)>, path: &[String], key: &str, value: Value) {
    match path.split_first() {
        None => entries.push((key.to_string(), value)),
        Some((head, rest)) => {
            let position = entries
                .iter()
                .position(|(k, v)| k == head && matches!(v, Value::Object(_)));
            let index = match position {
                Some(index) => index,
                None => {
                    entries.push((head.clone(), Value::Object(Vec::new())));
                    entries.len() - 1
                }
            };
            if let Value::Object(inner) = &mut entries[index].1 {
                insert(inner, rest, key, value);
            }
        }
    }
}

/// The statements a rewritten function starts with, plus what they need.
#[derive(Debug, Default)]
pub struct RenderedBindings {
    pub statements: Vec<String>,
    pub used: UsedPrimitives,
    pub warnings: Vec<Diagnostic>,
}

fn resolution_call(
    dependency: &DependencyDescriptor,
    catalog: &InterfaceCatalog,
    names: &CallNames,
    text: &str,
    rendered: &mut RenderedBindings,
) -> String {
    let token = match catalog.token_for(&dependency.interface_name) {
        Some(token) => token.to_string(),
        None => {
            rendered.warnings.push(
                Diagnostic::warning(
                    ErrorCode::UnresolvedInterface,
                    format!(
                        "No implementation of `{}` is known; resolving `{}` by interface name",
                        dependency.interface_name, dependency.binding_name
                    ),
                )
                .at(text, dependency.span),
            );
            dependency.interface_name.clone()
        }
    };

    let function = if dependency.optional {
        rendered.used.optional = true;
        &names.optional
    } else {
        rendered.used.required = true;
        &names.required
    };
    let call = format!("{}({})", function, quote(&token));

    match &dependency.fallback {
        Some(fallback) if SIMPLE_EXPRESSION.is_match(fallback) => format!("{} ?? {}", call, fallback),
        Some(fallback) => format!("{} ?? ({})", call, fallback),
        None => call,
    }
}

/// One `const` per body-level name, in order of first appearance.
pub fn render_bindings(
    outcome: &ExtractionOutcome,
    catalog: &InterfaceCatalog,
    names: &CallNames,
    text: &str,
) -> RenderedBindings {
    let mut rendered = RenderedBindings::default();

    for root in outcome.roots() {
        let spread = outcome
            .spreads
            .iter()
            .find(|s| s.group == root)
            .map(|s| s.base.as_str());

        let members: Vec<&DependencyDescriptor> =
            outcome.dependencies.iter().filter(|d| d.root() == root).collect();

        let value = match members.as_slice() {
            [single] if single.group.is_none() => {
                Value::Call(resolution_call(single, catalog, names, text, &mut rendered))
            }
            _ => {
                let mut entries = Vec::new();
                for dependency in members {
                    let call = resolution_call(dependency, catalog, names, text, &mut rendered);
                    insert(&mut entries, &dependency.path, &dependency.binding_name, Value::Call(call));
                }
                Value::Object(entries)
            }
        };

        rendered
            .statements
            .push(format!("const {} = {};", root, value.render(spread)));
    }

    rendered
}
