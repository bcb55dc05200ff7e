use super::artifact::*;
use crate::catalog::{qualified_key, ImplementationRecord, InterfaceCatalog, RegistrationKind};
use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::file_system::relative_import_path;
use crate::options::TransformerOptions;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Build the configuration artifact for `used_interfaces`, closed over the
/// constructor dependencies of the chosen implementations. Interfaces without an
/// implementation are reported and left out.
pub fn generate(
    catalog: &InterfaceCatalog,
    used_interfaces: &BTreeSet<String>,
    options: &TransformerOptions,
) -> ConfigurationArtifact {
    let mut artifact = ConfigurationArtifact {
        output_path: options.config_output.clone(),
        runtime_module: options.runtime.module.clone(),
        container_type: options.runtime.container.clone(),
        ..Default::default()
    };

    // Interface to its record, and for transitive ones the class that needs it.
    let mut chosen: BTreeMap<String, &ImplementationRecord> = BTreeMap::new();
    let mut missing: BTreeMap<String, Option<String>> = BTreeMap::new();
    let mut queue: VecDeque<(String, Option<String>)> =
        used_interfaces.iter().map(|i| (i.clone(), None)).collect();

    // Qualified implementations of every reached interface, by `Interface#qualifier`.
    let mut qualified: BTreeMap<String, &ImplementationRecord> = BTreeMap::new();

    let push_dependencies = |queue: &mut VecDeque<(String, Option<String>)>, record: &ImplementationRecord| {
        for dependency in &record.constructor_dependencies {
            queue.push_back((
                dependency.interface_name.clone(),
                Some(record.implementation_class_name.clone()),
            ));
        }
    };

    while let Some((interface, required_by)) = queue.pop_front() {
        if chosen.contains_key(&interface) || missing.contains_key(&interface) {
            continue;
        }
        let bare = catalog.lookup(&interface);
        for (qualifier, record) in catalog.qualified_of(&interface) {
            if bare.map(|b| b.sanitized_token == record.sanitized_token).unwrap_or(false) {
                continue;
            }
            push_dependencies(&mut queue, record);
            qualified.insert(qualified_key(&interface, qualifier), record);
        }
        match bare {
            Some(record) => {
                push_dependencies(&mut queue, record);
                chosen.insert(interface, record);
            }
            None => {
                missing.insert(interface, required_by);
            }
        }
    }

    for (interface, required_by) in &missing {
        let message = match required_by {
            Some(class) => format!(
                "No implementation registered for `{}` (required by the constructor of `{}`)",
                interface, class
            ),
            None => format!("No implementation registered for `{}`", interface),
        };
        artifact
            .diagnostics
            .push(Diagnostic::error(ErrorCode::MissingImplementation, message).in_file(&options.config_output));
    }

    // One import and one factory per distinct (class, file).
    let mut classes: BTreeMap<(String, String), &ImplementationRecord> = BTreeMap::new();
    for record in chosen.values().chain(qualified.values()) {
        classes
            .entry((record.implementation_class_name.clone(), record.source_file_path.clone()))
            .or_insert(record);
    }

    let mut name_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (class_name, _) in classes.keys() {
        *name_counts.entry(class_name.as_str()).or_default() += 1;
    }

    let mut local_names: BTreeMap<(String, String), String> = BTreeMap::new();
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for (class_name, file) in classes.keys() {
        let local = if name_counts[class_name.as_str()] > 1 {
            let n = seen.entry(class_name.as_str()).or_default();
            *n += 1;
            format!("{}_{}", class_name, n)
        } else {
            class_name.clone()
        };
        local_names.insert((class_name.clone(), file.clone()), local);
    }

    for (key, record) in &classes {
        let local = local_names[key].clone();
        artifact.imports.push(ImportEntry {
            class_name: record.implementation_class_name.clone(),
            local_name: local.clone(),
            module_specifier: relative_import_path(&options.config_output, &record.source_file_path),
            source_file_path: record.source_file_path.clone(),
        });

        let arity = record
            .constructor_dependencies
            .iter()
            .map(|d| d.index + 1)
            .max()
            .unwrap_or(0);
        let mut arguments = vec![FactoryArgument::Undefined; arity];
        for dependency in &record.constructor_dependencies {
            if let Some(target) = chosen.get(&dependency.interface_name) {
                arguments[dependency.index] = FactoryArgument::Resolve {
                    token: target.sanitized_token.clone(),
                    optional: dependency.optional,
                };
            }
        }

        artifact.factories.push(FactoryDefinition {
            name: format!("create{}", local),
            class_local_name: local,
            arguments,
        });
    }

    for (interface, record) in &chosen {
        let key = (record.implementation_class_name.clone(), record.source_file_path.clone());
        let factory = format!("create{}", local_names[&key]);
        let token = record.sanitized_token.clone();
        artifact.token_table.insert(
            token.clone(),
            TokenEntry {
                token: token.clone(),
                interface_name: interface.clone(),
                implementation_class_name: record.implementation_class_name.clone(),
                source_file_path: record.source_file_path.clone(),
                scope: record.scope,
                factory,
                registration: record.registration,
                qualifier: None,
            },
        );

        let implementations = catalog
            .implementations_of(interface)
            .iter()
            .map(|c| c.class_name.clone())
            .collect();
        artifact
            .interface_implementations
            .insert(interface.clone(), implementations);
    }

    for record in qualified.values() {
        let key = (record.implementation_class_name.clone(), record.source_file_path.clone());
        let factory = format!("create{}", local_names[&key]);
        let token = record.sanitized_token.clone();
        artifact.token_table.entry(token.clone()).or_insert_with(|| TokenEntry {
            token,
            interface_name: record.interface_name.clone(),
            implementation_class_name: record.implementation_class_name.clone(),
            source_file_path: record.source_file_path.clone(),
            scope: record.scope,
            factory,
            registration: record.registration,
            qualifier: record.qualifier.clone(),
        });
    }

    // A class maps to its own token when it was asked for by name, otherwise to the
    // first of its tokens.
    for entry in artifact.token_table.values() {
        let class = entry.implementation_class_name.clone();
        if entry.registration == RegistrationKind::SelfClass {
            artifact.class_tokens.insert(class, entry.token.clone());
        } else {
            artifact.class_tokens.entry(class).or_insert_with(|| entry.token.clone());
        }
    }

    artifact
}
