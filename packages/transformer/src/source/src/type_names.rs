use oxc_ast::ast::*;

/// `Foo` or `ns.Foo`.
pub fn type_name_text(name: &TSTypeName) -> Option<String> {
    match name {
        TSTypeName::IdentifierReference(id) => Some(id.name.to_string()),
        TSTypeName::QualifiedName(q) => {
            Some(format!("{}.{}", type_name_text(&q.left)?, q.right.name))
        }
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// Right-most identifier of a type name: `Inject` for both `Inject` and `DI.Inject`.
pub fn type_name_last<'b>(name: &'b TSTypeName) -> Option<&'b str> {
    match name {
        TSTypeName::IdentifierReference(id) => Some(id.name.as_str()),
        TSTypeName::QualifiedName(q) => Some(q.right.name.as_str()),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// Canonical spelling of an interface reference, used as the catalog key.
///
/// Only plain references qualify: `Logger`, `ns.Logger`, `Repository<User>`,
/// `Cache<string, Item[]>`. Unions, function types, literals and so on are `None`.
pub fn render_interface_reference(ty: &TSType) -> Option<String> {
    match ty {
        TSType::TSTypeReference(r) => render_type_reference(&r.type_name, r.type_arguments.as_deref()),
        _ => None,
    }
}

pub fn render_type_reference(
    name: &TSTypeName,
    arguments: Option<&TSTypeParameterInstantiation>,
) -> Option<String> {
    let base = type_name_text(name)?;
    match arguments {
        Some(args) if !args.params.is_empty() => {
            let rendered = args
                .params
                .iter()
                .map(render_type_argument)
                .collect::<Option<Vec<_>>>()?;
            Some(format!("{}<{}>", base, rendered.join(", ")))
        }
        _ => Some(base),
    }
}

fn render_type_argument(ty: &TSType) -> Option<String> {
    match ty {
        TSType::TSTypeReference(_) => render_interface_reference(ty),
        TSType::TSStringKeyword(_) => Some("string".to_string()),
        TSType::TSNumberKeyword(_) => Some("number".to_string()),
        TSType::TSBooleanKeyword(_) => Some("boolean".to_string()),
        TSType::TSBigIntKeyword(_) => Some("bigint".to_string()),
        TSType::TSAnyKeyword(_) => Some("any".to_string()),
        TSType::TSUnknownKeyword(_) => Some("unknown".to_string()),
        TSType::TSArrayType(array) => Some(format!("{}[]", render_type_argument(&array.element_type)?)),
        _ => None,
    }
}

/// Static name of an object/type member key.
pub fn property_key_name(key: &PropertyKey) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

/// Annotated view of a parameter pattern, seeing through a default value
/// (`{ a }: Props = {}` carries its annotation on the left side).
pub fn annotated_pattern<'b, 'a>(
    pattern: &'b BindingPattern<'a>,
) -> (&'b BindingPattern<'a>, Option<&'b TSType<'a>>) {
    if let Some(annotation) = &pattern.type_annotation {
        return (pattern, Some(&annotation.type_annotation));
    }
    if let BindingPatternKind::AssignmentPattern(assign) = &pattern.kind {
        let left = &assign.left;
        return (left, left.type_annotation.as_ref().map(|a| &a.type_annotation));
    }
    (pattern, None)
}

/// Every name a pattern binds, in source order.
pub fn bound_names(pattern: &BindingPattern, out: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => out.push(id.name.to_string()),
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                bound_names(&property.value, out);
            }
            if let Some(rest) = &object.rest {
                bound_names(&rest.argument, out);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                bound_names(element, out);
            }
            if let Some(rest) = &array.rest {
                bound_names(&rest.argument, out);
            }
        }
        BindingPatternKind::AssignmentPattern(assign) => bound_names(&assign.left, out),
    }
}
