use super::edits::EditSet;
use crate::options::RuntimeNames;
use oxc_ast::ast::*;

/// Which resolution primitives a file's rewritten functions call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsedPrimitives {
    pub required: bool,
    pub optional: bool,
}

impl UsedPrimitives {
    pub fn merge(&mut self, other: UsedPrimitives) {
        self.required |= other.required;
        self.optional |= other.optional;
    }

    pub fn any(&self) -> bool {
        self.required || self.optional
    }
}

/// Local names the generated code calls the primitives by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNames {
    pub required: String,
    pub optional: String,
}

fn module_export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.to_string(),
        ModuleExportName::IdentifierReference(id) => id.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

/// What a file already imports from the runtime module, and where a missing import
/// can go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeImports {
    pub required_local: Option<String>,
    pub optional_local: Option<String>,
    /// End of the last named specifier of a value import from the runtime module.
    merge_point: Option<u32>,
    last_import_end: Option<u32>,
    prologue_end: Option<u32>,
}

impl RuntimeImports {
    pub fn analyze(program: &Program, runtime: &RuntimeNames) -> Self {
        let mut imports = RuntimeImports {
            prologue_end: program
                .directives
                .last()
                .map(|d| d.span.end)
                .or_else(|| program.hashbang.as_ref().map(|h| h.span.end)),
            ..Default::default()
        };

        for stmt in &program.body {
            let Statement::ImportDeclaration(decl) = stmt else {
                continue;
            };
            imports.last_import_end = Some(decl.span.end);
            if decl.source.value.as_str() != runtime.module.as_str() || decl.import_kind.is_type() {
                continue;
            }
            let Some(specifiers) = &decl.specifiers else {
                continue;
            };
            for specifier in specifiers {
                let ImportDeclarationSpecifier::ImportSpecifier(specifier) = specifier else {
                    continue;
                };
                if specifier.import_kind.is_type() {
                    continue;
                }
                let end = specifier.span.end;
                imports.merge_point = Some(imports.merge_point.map_or(end, |at| at.max(end)));
                let imported = module_export_name(&specifier.imported);
                let local = specifier.local.name.to_string();
                if imported == runtime.required && imports.required_local.is_none() {
                    imports.required_local = Some(local);
                } else if imported == runtime.optional && imports.optional_local.is_none() {
                    imports.optional_local = Some(local);
                }
            }
        }
        imports
    }

    /// Existing local aliases win over the canonical names.
    pub fn call_names(&self, runtime: &RuntimeNames) -> CallNames {
        CallNames {
            required: self.required_local.clone().unwrap_or_else(|| runtime.required.clone()),
            optional: self.optional_local.clone().unwrap_or_else(|| runtime.optional.clone()),
        }
    }

    /// Edits that make every primitive in `used` importable. Empty when the file
    /// already imports them.
    pub fn edits(&self, used: UsedPrimitives, runtime: &RuntimeNames) -> EditSet {
        let mut missing = Vec::new();
        if used.required && self.required_local.is_none() {
            missing.push(runtime.required.as_str());
        }
        if used.optional && self.optional_local.is_none() {
            missing.push(runtime.optional.as_str());
        }

        let mut edits = EditSet::new();
        if missing.is_empty() {
            return edits;
        }

        if let Some(at) = self.merge_point {
            edits.insert(at, format!(", {}", missing.join(", ")));
            return edits;
        }

        let declaration = format!(
            "import {{ {} }} from {};",
            missing.join(", "),
            quote(&runtime.module)
        );
        match self.last_import_end.or(self.prologue_end) {
            Some(at) => edits.insert(at, format!("\n{}", declaration)),
            None => edits.insert(0, format!("{}\n", declaration)),
        }
        edits
    }
}

/// Double-quoted JavaScript string literal.
pub fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}
