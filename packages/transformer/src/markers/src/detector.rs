use super::marker::{marker_of, Marker};
use crate::options::MarkerNames;
use crate::source::{annotated_pattern, property_key_name, FunctionLike, LocalTypes};
use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};

/// Nesting limit when following object types through local declarations.
pub const MAX_OBJECT_DEPTH: usize = 8;

/// Per-unit context shared by detection and extraction.
pub struct DetectionContext<'c, 'b, 'a> {
    pub markers: &'c MarkerNames,
    pub local_types: &'c LocalTypes<'b, 'a>,
    pub text: &'a str,
}

/// Members of an object-shaped type, either inline or declared in the same file.
#[derive(Clone, Copy)]
pub struct ObjectType<'b, 'a> {
    pub members: &'b [TSSignature<'a>],
    /// Body span of the interface or alias the members live in; `None` for a type
    /// literal written in place.
    pub declaration: Option<Span>,
}

impl<'c, 'b, 'a> DetectionContext<'c, 'b, 'a> {
    pub fn marker_of(&self, ty: &TSType) -> Option<Marker> {
        marker_of(ty, self.markers, self.text)
    }

    pub fn object_type(&self, ty: &'b TSType<'a>) -> Option<ObjectType<'b, 'a>> {
        match ty {
            TSType::TSTypeLiteral(literal) => Some(ObjectType {
                members: &literal.members,
                declaration: None,
            }),
            TSType::TSTypeReference(reference) if reference.type_arguments.is_none() => {
                let local = self.local_types.resolve(&reference.type_name)?;
                Some(ObjectType {
                    members: local.members,
                    declaration: Some(local.span),
                })
            }
            _ => None,
        }
    }
}

/// Name and annotation of a property signature; `None` for methods, index
/// signatures, computed keys and unannotated members.
pub fn property_member<'b, 'a>(member: &'b TSSignature<'a>) -> Option<(String, &'b TSType<'a>, Span)> {
    let TSSignature::TSPropertySignature(property) = member else {
        return None;
    };
    if property.computed {
        return None;
    }
    let key = property_key_name(&property.key)?;
    let annotation = property.type_annotation.as_ref()?;
    Some((key, &annotation.type_annotation, member.span()))
}

/// One marker occurrence reachable from a function's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionSite {
    pub param_index: usize,
    /// Member keys from the parameter down to the marker; empty when the parameter
    /// itself is annotated with the marker.
    pub path: Vec<String>,
    pub marker: Marker,
    pub span: Span,
}

pub fn find_injection_sites<'b, 'a>(
    function: &FunctionLike<'b, 'a>,
    ctx: &DetectionContext<'_, 'b, 'a>,
) -> Vec<InjectionSite> {
    let mut sites = Vec::new();
    for (index, param) in function.params.items.iter().enumerate() {
        let (_, Some(ty)) = annotated_pattern(&param.pattern) else {
            continue;
        };
        if let Some(marker) = ctx.marker_of(ty) {
            sites.push(InjectionSite {
                param_index: index,
                path: Vec::new(),
                marker,
                span: param.span,
            });
        } else if let Some(object) = ctx.object_type(ty) {
            collect_object_sites(index, &mut Vec::new(), object, ctx, 0, &mut sites);
        }
    }
    sites
}

/// Markers anywhere inside an object type, with their member paths.
pub fn collect_object_sites<'b, 'a>(
    param_index: usize,
    path: &mut Vec<String>,
    object: ObjectType<'b, 'a>,
    ctx: &DetectionContext<'_, 'b, 'a>,
    depth: usize,
    out: &mut Vec<InjectionSite>,
) {
    if depth >= MAX_OBJECT_DEPTH {
        return;
    }
    for member in object.members {
        let Some((key, ty, span)) = property_member(member) else {
            continue;
        };
        path.push(key);
        if let Some(marker) = ctx.marker_of(ty) {
            out.push(InjectionSite {
                param_index,
                path: path.clone(),
                marker,
                span,
            });
        } else if let Some(inner) = ctx.object_type(ty) {
            collect_object_sites(param_index, path, inner, ctx, depth + 1, out);
        }
        path.pop();
    }
}

pub fn has_injection_markers<'b, 'a>(function: &FunctionLike<'b, 'a>, ctx: &DetectionContext<'_, 'b, 'a>) -> bool {
    !find_injection_sites(function, ctx).is_empty()
}
