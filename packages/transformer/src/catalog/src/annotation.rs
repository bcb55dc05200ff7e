use super::scope::LifecycleScope;
use crate::options::DecoratorNames;
use crate::source::property_key_name;
use oxc_ast::ast::*;

/// What a class's decorators say about it, read out of band. A class is only a
/// candidate when one of the service decorators is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAnnotation {
    pub scope: Option<LifecycleScope>,
    pub primary: bool,
    pub qualifier: Option<String>,
}

/// Name and arguments of `@Name`, `@Name(...)` or `@ns.Name(...)`.
pub fn decorator_call<'b, 'a>(decorator: &'b Decorator<'a>) -> Option<(&'b str, &'b [Argument<'a>])> {
    let no_arguments: &'b [Argument<'a>] = &[];
    match &decorator.expression {
        Expression::Identifier(id) => Some((id.name.as_str(), no_arguments)),
        Expression::StaticMemberExpression(member) => Some((member.property.name.as_str(), no_arguments)),
        Expression::CallExpression(call) => {
            let name = match &call.callee {
                Expression::Identifier(id) => id.name.as_str(),
                Expression::StaticMemberExpression(member) => member.property.name.as_str(),
                _ => return None,
            };
            Some((name, &call.arguments[..]))
        }
        _ => None,
    }
}

fn first_string(args: &[Argument]) -> Option<String> {
    match args.first()?.as_expression()? {
        Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

fn read_service_options(object: &ObjectExpression, annotation: &mut ServiceAnnotation) {
    for property in &object.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            continue;
        };
        let Some(key) = property_key_name(&property.key) else {
            continue;
        };
        match (key.as_str(), &property.value) {
            ("scope", Expression::StringLiteral(lit)) => {
                annotation.scope = LifecycleScope::parse(&lit.value);
            }
            ("primary", Expression::BooleanLiteral(lit)) => annotation.primary = lit.value,
            ("qualifier", Expression::StringLiteral(lit)) => {
                annotation.qualifier = Some(lit.value.to_string());
            }
            _ => {}
        }
    }
}

pub fn read_service_annotation(class: &Class, names: &DecoratorNames) -> Option<ServiceAnnotation> {
    let mut service: Option<ServiceAnnotation> = None;
    let mut standalone = ServiceAnnotation::default();

    for decorator in &class.decorators {
        let Some((name, args)) = decorator_call(decorator) else {
            continue;
        };
        if names.service.iter().any(|s| s == name) {
            let mut annotation = ServiceAnnotation::default();
            if let Some(Expression::ObjectExpression(object)) = args.first().and_then(|a| a.as_expression()) {
                read_service_options(object, &mut annotation);
            }
            service = Some(annotation);
        } else if name == names.primary {
            standalone.primary = true;
        } else if name == names.scope {
            standalone.scope = first_string(args).as_deref().and_then(LifecycleScope::parse);
        } else if name == names.qualifier {
            standalone.qualifier = first_string(args);
        }
    }

    service.map(|mut annotation| {
        annotation.primary |= standalone.primary;
        if standalone.scope.is_some() {
            annotation.scope = standalone.scope;
        }
        if standalone.qualifier.is_some() {
            annotation.qualifier = standalone.qualifier;
        }
        annotation
    })
}
