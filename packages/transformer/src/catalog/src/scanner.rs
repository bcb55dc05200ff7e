use super::annotation::read_service_annotation;
use super::interface_catalog::InterfaceCatalog;
use super::record::{ConstructorDependency, ImplementationRecord, RegistrationKind};
use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::markers::{marker_of, MarkerArgument};
use crate::options::{MarkerNames, TransformerOptions};
use crate::source::{annotated_pattern, class_constructor, collect_classes, render_type_reference, SourceUnit};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;

/// Build a catalog from `units`, in order. Units that fail to parse contribute a
/// diagnostic and nothing else.
pub fn scan(units: &[SourceUnit], options: &TransformerOptions) -> InterfaceCatalog {
    let mut catalog = InterfaceCatalog::new();
    for unit in units {
        scan_unit(unit, options, &mut catalog);
    }
    catalog
}

pub fn scan_unit(unit: &SourceUnit, options: &TransformerOptions, catalog: &mut InterfaceCatalog) {
    let allocator = Allocator::default();
    let program = match unit.parse(&allocator) {
        Ok(program) => program,
        Err(err) => {
            catalog.push_diagnostic(err.to_diagnostic().in_file(&unit.path));
            return;
        }
    };

    for class in collect_classes(&program) {
        let Some(id) = &class.id else {
            continue;
        };
        let Some(annotation) = read_service_annotation(class, &options.decorators) else {
            continue;
        };
        let class_name = id.name.to_string();

        let type_parameters: Vec<String> = class
            .type_parameters
            .as_ref()
            .map(|tp| tp.params.iter().map(|p| p.name.name.to_string()).collect())
            .unwrap_or_default();

        let (constructor_dependencies, warnings) = constructor_dependencies(class, &options.markers, unit);
        for warning in warnings {
            catalog.push_diagnostic(warning);
        }

        let mut targets: Vec<(String, RegistrationKind)> = class
            .implements
            .iter()
            .filter_map(|imp| render_type_reference(&imp.expression, imp.type_arguments.as_deref()))
            .map(|name| (name, RegistrationKind::Interface))
            .collect();
        if options.register_base_classes {
            if let Some(Expression::Identifier(base)) = &class.super_class {
                targets.push((base.name.to_string(), RegistrationKind::BaseClass));
            }
        }
        targets.push((class_name.clone(), RegistrationKind::SelfClass));

        let mut seen: Vec<String> = Vec::new();
        for (interface_name, registration) in targets {
            if seen.contains(&interface_name) {
                continue;
            }
            seen.push(interface_name.clone());

            let mut record = ImplementationRecord::new(&class_name, interface_name, &unit.path)
                .with_scope(annotation.scope.unwrap_or(options.default_scope))
                .primary(annotation.primary)
                .with_qualifier(annotation.qualifier.clone());
            record.is_generic = !type_parameters.is_empty();
            record.type_parameters = type_parameters.clone();
            record.constructor_dependencies = constructor_dependencies.clone();
            record.registration = registration;
            catalog.register(record, options.ambiguity_policy);
        }
    }
}

/// Marker-typed constructor parameters, in declaration order.
fn constructor_dependencies(
    class: &Class,
    markers: &MarkerNames,
    unit: &SourceUnit,
) -> (Vec<ConstructorDependency>, Vec<Diagnostic>) {
    let mut dependencies = Vec::new();
    let mut warnings = Vec::new();
    let Some(constructor) = class_constructor(class) else {
        return (dependencies, warnings);
    };

    for (index, param) in constructor.params.items.iter().enumerate() {
        let (pattern, Some(ty)) = annotated_pattern(&param.pattern) else {
            continue;
        };
        let Some(marker) = marker_of(ty, markers, &unit.text) else {
            continue;
        };
        let parameter_name = match &pattern.kind {
            BindingPatternKind::BindingIdentifier(id) => id.name.to_string(),
            _ => format!("arg{}", index),
        };
        match marker.argument() {
            MarkerArgument::Interface(interface_name) => dependencies.push(ConstructorDependency {
                index,
                parameter_name,
                interface_name: interface_name.clone(),
                optional: marker.is_optional(),
            }),
            MarkerArgument::Unresolvable(_) => warnings.push(
                Diagnostic::warning(
                    ErrorCode::UnresolvableMarkerArgument,
                    format!(
                        "Constructor parameter `{}` is typed `{}`, which does not name an interface; it is left undefined",
                        parameter_name,
                        marker.describe(markers)
                    ),
                )
                .in_file(&unit.path)
                .at(&unit.text, param.span),
            ),
        }
    }

    (dependencies, warnings)
}
