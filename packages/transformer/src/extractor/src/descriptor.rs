use crate::diagnostics::Diagnostic;
use oxc_span::Span;
use serde::Serialize;
use std::collections::BTreeSet;

/// One service a function needs, and the local name it is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDescriptor {
    pub binding_name: String,
    pub interface_name: String,
    pub optional: bool,
    /// Local services object the dependency is a member of.
    pub group: Option<String>,
    /// Keys between `group` and `binding_name` for nested groups.
    pub path: Vec<String>,
    /// Source text of a destructuring default, used when resolution yields nothing.
    pub fallback: Option<String>,
    #[serde(skip)]
    pub span: Span,
}

impl DependencyDescriptor {
    /// The name declared in the function body for this dependency.
    pub fn root(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.binding_name)
    }
}

/// Elements to drop from one comma/semicolon separated list: a parameter list, an
/// object pattern or the members of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRemoval {
    pub elements: Vec<Span>,
    pub removed: BTreeSet<usize>,
}

/// Signature changes required once the dependencies are bound in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignaturePlan {
    /// Indices into the function's `params.items`.
    pub removed_params: BTreeSet<usize>,
    pub lists: Vec<ListRemoval>,
    /// Binding identifiers to rename, as (span of the name, new name).
    pub renames: Vec<(Span, String)>,
}

/// `const <group> = { ...<base>, ... }` for a parameter that keeps plain members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpread {
    pub group: String,
    pub base: String,
}

#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    pub dependencies: Vec<DependencyDescriptor>,
    pub spreads: Vec<GroupSpread>,
    pub signature: SignaturePlan,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl ExtractionOutcome {
    /// Names declared in the body, in order of first appearance.
    pub fn roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = Vec::new();
        for dependency in &self.dependencies {
            let root = dependency.root();
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }

    pub fn interface_names(&self) -> Vec<&str> {
        self.dependencies.iter().map(|d| d.interface_name.as_str()).collect()
    }
}
