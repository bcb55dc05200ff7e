use super::artifact::*;
use crate::transform::quote;

pub const GENERATED_HEADER: &str = "// Generated by di-transformer. Do not edit.";

impl ConfigurationArtifact {
    /// Render the TypeScript module. Equal artifacts render to equal text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(GENERATED_HEADER);
        out.push('\n');

        if !self.factories.is_empty() {
            out.push_str(&format!(
                "import type {{ {} }} from {};\n",
                self.container_type,
                quote(&self.runtime_module)
            ));
        }
        for import in &self.imports {
            let binding = if import.local_name == import.class_name {
                import.class_name.clone()
            } else {
                format!("{} as {}", import.class_name, import.local_name)
            };
            out.push_str(&format!(
                "import {{ {} }} from {};\n",
                binding,
                quote(&import.module_specifier)
            ));
        }

        for factory in &self.factories {
            out.push('\n');
            out.push_str(&self.render_factory(factory));
        }

        out.push('\n');
        out.push_str(&self.render_config());
        out.push('\n');
        out.push_str(&render_string_map(
            "SERVICE_TOKENS",
            self.class_tokens.iter().map(|(class, token)| (class.as_str(), quote(token))),
        ));
        out.push('\n');
        out.push_str(&render_string_map(
            "INTERFACE_IMPLEMENTATIONS",
            self.interface_implementations.iter().map(|(interface, classes)| {
                let list: Vec<String> = classes.iter().map(|c| quote(c)).collect();
                (interface.as_str(), format!("[{}]", list.join(", ")))
            }),
        ));
        out
    }

    fn render_factory(&self, factory: &FactoryDefinition) -> String {
        let arguments: Vec<String> = factory
            .arguments
            .iter()
            .map(|argument| match argument {
                FactoryArgument::Resolve { token, optional: false } => {
                    format!("container.resolve({})", quote(token))
                }
                FactoryArgument::Resolve { token, optional: true } => {
                    format!("container.resolveOptional({})", quote(token))
                }
                FactoryArgument::Undefined => "undefined".to_string(),
            })
            .collect();
        format!(
            "export function {}(container: {}) {{\n  return new {}({});\n}}\n",
            factory.name,
            self.container_type,
            factory.class_local_name,
            arguments.join(", ")
        )
    }

    fn render_config(&self) -> String {
        if self.token_table.is_empty() {
            return "export const DI_CONFIG = {};\n".to_string();
        }
        let mut out = String::from("export const DI_CONFIG = {\n");
        for entry in self.token_table.values() {
            out.push_str(&format!("  {}: {{\n", quote(&entry.token)));
            out.push_str(&format!("    factory: {},\n", entry.factory));
            out.push_str(&format!("    scope: {},\n", quote(entry.scope.as_str())));
            out.push_str(&format!("    interfaceName: {},\n", quote(&entry.interface_name)));
            out.push_str(&format!(
                "    implementationClass: {},\n",
                quote(&entry.implementation_class_name)
            ));
            out.push_str(&format!("    filePath: {},\n", quote(&entry.source_file_path)));
            if let Some(qualifier) = &entry.qualifier {
                out.push_str(&format!("    qualifier: {},\n", quote(qualifier)));
            }
            out.push_str("  },\n");
        }
        out.push_str("};\n");
        out
    }
}

fn render_string_map<'k>(name: &str, entries: impl Iterator<Item = (&'k str, String)>) -> String {
    let body: Vec<String> = entries
        .map(|(key, value)| format!("  {}: {},\n", quote(key), value))
        .collect();
    if body.is_empty() {
        format!("export const {} = {{}};\n", name)
    } else {
        format!("export const {} = {{\n{}}};\n", name, body.concat())
    }
}
