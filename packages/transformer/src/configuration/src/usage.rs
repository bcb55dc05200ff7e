use crate::catalog::InterfaceCatalog;
use crate::diagnostics::TransformError;
use crate::markers::{collect_object_sites, find_injection_sites, DetectionContext, ObjectType};
use crate::options::TransformerOptions;
use crate::source::{
    annotated_pattern, class_constructor, collect_classes, collect_function_likes, LocalTypes, SourceUnit,
};
use oxc_allocator::Allocator;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

/// Every interface named by a marker in `unit`: function parameters, class
/// constructor parameters and same-file prop types.
pub fn used_interfaces_in(unit: &SourceUnit, options: &TransformerOptions) -> Result<BTreeSet<String>, TransformError> {
    let allocator = Allocator::default();
    let program = unit.parse(&allocator)?;
    let local_types = LocalTypes::from_program(&program);
    let ctx = DetectionContext {
        markers: &options.markers,
        local_types: &local_types,
        text: &unit.text,
    };

    let mut sites = Vec::new();
    for function in collect_function_likes(&program) {
        sites.extend(find_injection_sites(&function, &ctx));
    }
    for local in local_types.iter() {
        let object = ObjectType {
            members: local.members,
            declaration: Some(local.span),
        };
        collect_object_sites(0, &mut Vec::new(), object, &ctx, 0, &mut sites);
    }

    let mut used: BTreeSet<String> = sites
        .iter()
        .filter_map(|site| site.marker.interface_name().map(|n| n.to_string()))
        .collect();

    for class in collect_classes(&program) {
        let Some(constructor) = class_constructor(class) else {
            continue;
        };
        for param in &constructor.params.items {
            if let (_, Some(ty)) = annotated_pattern(&param.pattern) {
                if let Some(name) = ctx.marker_of(ty).as_ref().and_then(|m| m.interface_name()) {
                    used.insert(name.to_string());
                }
            }
        }
    }

    Ok(used)
}

/// Union of [`used_interfaces_in`] over `units`. Units that fail to parse are
/// skipped; the catalog scan reports them.
pub fn collect_used_interfaces(units: &[SourceUnit], options: &TransformerOptions) -> BTreeSet<String> {
    units
        .iter()
        .filter_map(|unit| used_interfaces_in(unit, options).ok())
        .flatten()
        .collect()
}

/// Interfaces behind the tokens that already-rewritten units resolve, such as
/// `useService("Api__src_api")`. Keeps a rebuild over in-place output from dropping
/// registrations. Calls through a renamed import are not seen.
pub fn collect_resolved_interfaces(
    units: &[SourceUnit],
    catalog: &InterfaceCatalog,
    options: &TransformerOptions,
) -> BTreeSet<String> {
    let pattern = format!(
        r#"\b(?:{}|{})\(\s*"([^"\\]*)"\s*\)"#,
        regex::escape(&options.runtime.required),
        regex::escape(&options.runtime.optional)
    );
    let Ok(call) = Regex::new(&pattern) else {
        return BTreeSet::new();
    };

    let mut by_token: HashMap<&str, &str> = HashMap::new();
    for record in catalog.records() {
        by_token.insert(&record.sanitized_token, &record.interface_name);
    }
    for (_, record) in catalog.qualified_records() {
        by_token.insert(&record.sanitized_token, &record.interface_name);
    }

    let mut used = BTreeSet::new();
    for unit in units {
        for captures in call.captures_iter(&unit.text) {
            let token = &captures[1];
            if let Some(interface) = by_token.get(token) {
                used.insert(interface.to_string());
            } else if catalog.lookup(token).is_some() {
                used.insert(token.to_string());
            }
        }
    }
    used
}
