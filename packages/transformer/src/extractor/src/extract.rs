use super::descriptor::*;
use crate::diagnostics::{Diagnostic, ErrorCode, TransformError};
use crate::markers::{property_member, DetectionContext, MarkerArgument, ObjectType, MAX_OBJECT_DEPTH};
use crate::source::{annotated_pattern, bound_names, property_key_name, slice, FunctionLike};
use indexmap::IndexMap;
use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};
use std::collections::BTreeSet;

/// What a member type contributes to injection.
enum Injection {
    Service {
        interface_name: String,
        optional: bool,
        span: Span,
    },
    Group(Vec<(String, Injection)>),
}

enum Classified {
    Plain,
    Injection(Injection),
    /// Carries markers but cannot be injected; a warning was recorded.
    Skipped,
}

struct Extraction<'x, 'c, 'b, 'a> {
    function: &'x FunctionLike<'b, 'a>,
    ctx: &'x DetectionContext<'c, 'b, 'a>,
    outcome: ExtractionOutcome,
    /// Body-level name to the id of the signature piece that introduced it.
    roots: IndexMap<String, usize>,
    next_source: usize,
    /// Names still bound by each parameter after the plan is applied, when they
    /// differ from the parameter's own bindings.
    kept_names: IndexMap<usize, Vec<String>>,
}

/// Extract the dependencies of `function`. Errors make the whole function
/// non-transformable; warnings only drop the affected dependency.
pub fn extract<'b, 'a>(function: &FunctionLike<'b, 'a>, ctx: &DetectionContext<'_, 'b, 'a>) -> ExtractionOutcome {
    let mut extraction = Extraction {
        function,
        ctx,
        outcome: ExtractionOutcome::default(),
        roots: IndexMap::new(),
        next_source: 0,
        kept_names: IndexMap::new(),
    };
    extraction.run();
    extraction.check_remaining_parameters();
    extraction.outcome
}

impl<'x, 'c, 'b, 'a> Extraction<'x, 'c, 'b, 'a> {
    fn run(&mut self) {
        let function = self.function;
        for (index, param) in function.params.items.iter().enumerate() {
            let (pattern, Some(ty)) = annotated_pattern(&param.pattern) else {
                continue;
            };

            if let Some(marker) = self.ctx.marker_of(ty) {
                self.extract_marked_parameter(index, param, pattern, marker.argument(), marker.is_optional());
                continue;
            }

            let Some(object) = self.ctx.object_type(ty) else {
                continue;
            };
            match &pattern.kind {
                BindingPatternKind::ObjectPattern(object_pattern) => {
                    self.extract_destructured(index, object_pattern, object);
                }
                BindingPatternKind::BindingIdentifier(id) => {
                    self.extract_object_binding(index, id, object);
                }
                _ => {}
            }
        }
    }

    fn warn(&mut self, code: ErrorCode, span: Span, message: String) {
        let diagnostic = Diagnostic::warning(code, message).at(self.ctx.text, span);
        self.outcome.warnings.push(diagnostic);
    }

    fn fail(&mut self, code: ErrorCode, span: Span, message: String) {
        let diagnostic = Diagnostic::error(code, message).at(self.ctx.text, span);
        self.outcome.errors.push(diagnostic);
    }

    fn collision(&mut self, name: &str, span: Span) {
        let err = TransformError::BindingCollision {
            function: self.function.name.clone(),
            name: name.to_string(),
        };
        self.outcome.errors.push(err.to_diagnostic().at(self.ctx.text, span));
    }

    fn new_source(&mut self) -> usize {
        self.next_source += 1;
        self.next_source
    }

    /// Reserve `name` for the body. Returns false (and records the collision) when
    /// another signature piece already declared it.
    fn claim(&mut self, name: &str, source: usize, span: Span) -> bool {
        match self.roots.get(name) {
            Some(owner) if *owner != source => {
                self.collision(name, span);
                false
            }
            Some(_) => true,
            None => {
                self.roots.insert(name.to_string(), source);
                true
            }
        }
    }

    fn classify(&mut self, ty: &'b TSType<'a>, key: &str, span: Span, depth: usize) -> Classified {
        if let Some(marker) = self.ctx.marker_of(ty) {
            return match marker.argument() {
                MarkerArgument::Interface(interface_name) => Classified::Injection(Injection::Service {
                    interface_name: interface_name.clone(),
                    optional: marker.is_optional(),
                    span,
                }),
                MarkerArgument::Unresolvable(_) => {
                    let message = format!(
                        "`{}: {}` does not name an interface and is not injected",
                        key,
                        marker.describe(self.ctx.markers)
                    );
                    self.warn(ErrorCode::UnresolvableMarkerArgument, span, message);
                    Classified::Skipped
                }
            };
        }

        if depth >= MAX_OBJECT_DEPTH {
            return Classified::Plain;
        }
        let Some(object) = self.ctx.object_type(ty) else {
            return Classified::Plain;
        };

        let mut entries = Vec::new();
        let mut plain = Vec::new();
        let mut skipped = false;
        for member in object.members {
            let Some((member_key, member_ty, member_span)) = property_member(member) else {
                plain.push(member.span());
                continue;
            };
            match self.classify(member_ty, &member_key, member_span, depth + 1) {
                Classified::Plain => plain.push(member_span),
                Classified::Injection(injection) => entries.push((member_key, injection)),
                Classified::Skipped => skipped = true,
            }
        }

        if entries.is_empty() {
            return if skipped { Classified::Skipped } else { Classified::Plain };
        }
        if !plain.is_empty() {
            let message = format!(
                "`{}` mixes injected services with plain fields and is not injected",
                key
            );
            self.warn(ErrorCode::MixedServicesObject, span, message);
            return Classified::Skipped;
        }
        Classified::Injection(Injection::Group(entries))
    }

    fn push_descriptor(
        &mut self,
        binding_name: &str,
        group: Option<&str>,
        path: &[String],
        injection: &Injection,
        fallback: Option<String>,
    ) {
        if let Injection::Service {
            interface_name,
            optional,
            span,
        } = injection
        {
            self.outcome.dependencies.push(DependencyDescriptor {
                binding_name: binding_name.to_string(),
                interface_name: interface_name.clone(),
                optional: *optional,
                group: group.map(|g| g.to_string()),
                path: path.to_vec(),
                fallback,
                span: *span,
            });
        }
    }

    fn push_group(&mut self, group: &str, path: &mut Vec<String>, entries: &[(String, Injection)]) {
        for (key, entry) in entries {
            match entry {
                Injection::Service { .. } => self.push_descriptor(key, Some(group), path, entry, None),
                Injection::Group(inner) => {
                    path.push(key.clone());
                    self.push_group(group, path, inner);
                    path.pop();
                }
            }
        }
    }

    /// Bind `injection` to the local pattern `value`. Returns false when the pattern
    /// cannot receive it.
    fn bind(&mut self, value: &'b BindingPattern<'a>, injection: &Injection, span: Span) -> bool {
        let (target, fallback) = match &value.kind {
            BindingPatternKind::AssignmentPattern(assign) => (
                &assign.left,
                Some(slice(self.ctx.text, assign.right.span()).to_string()),
            ),
            _ => (value, None),
        };

        match (&target.kind, injection) {
            (BindingPatternKind::BindingIdentifier(id), Injection::Service { .. }) => {
                let source = self.new_source();
                if self.claim(&id.name, source, span) {
                    self.push_descriptor(&id.name, None, &[], injection, fallback);
                }
                true
            }
            (BindingPatternKind::BindingIdentifier(id), Injection::Group(entries)) => {
                let source = self.new_source();
                if self.claim(&id.name, source, span) {
                    self.push_group(&id.name, &mut Vec::new(), entries);
                }
                true
            }
            (BindingPatternKind::ObjectPattern(inner), Injection::Group(entries)) => {
                for property in &inner.properties {
                    let Some(key) = property_key_name(&property.key) else {
                        continue;
                    };
                    if let Some((_, entry)) = entries.iter().find(|(k, _)| *k == key) {
                        self.bind(&property.value, entry, property.span);
                    }
                }
                true
            }
            _ => {
                let message = format!(
                    "Cannot bind an injected service to this pattern in `{}`",
                    self.function.name
                );
                self.fail(ErrorCode::TransformationRuntime, span, message);
                false
            }
        }
    }

    /// `api: Inject<Api>` or `api: Inject<Api> = fallback`.
    fn extract_marked_parameter(
        &mut self,
        index: usize,
        param: &'b FormalParameter<'a>,
        pattern: &'b BindingPattern<'a>,
        argument: &MarkerArgument,
        optional: bool,
    ) {
        let BindingPatternKind::BindingIdentifier(id) = &pattern.kind else {
            return;
        };
        let interface_name = match argument {
            MarkerArgument::Interface(name) => name.clone(),
            MarkerArgument::Unresolvable(text) => {
                let message = format!(
                    "Parameter `{}` is typed with `{}`, which does not name an interface",
                    id.name, text
                );
                self.warn(ErrorCode::UnresolvableMarkerArgument, param.span, message);
                return;
            }
        };
        let fallback = match &param.pattern.kind {
            BindingPatternKind::AssignmentPattern(assign) => {
                Some(slice(self.ctx.text, assign.right.span()).to_string())
            }
            _ => None,
        };
        let injection = Injection::Service {
            interface_name,
            optional,
            span: param.span,
        };
        let source = self.new_source();
        if self.claim(&id.name, source, param.span) {
            self.push_descriptor(&id.name, None, &[], &injection, fallback);
        }
        self.outcome.signature.removed_params.insert(index);
    }

    /// `{ api, services }: { api: Inject<Api>; services: { ... } }`.
    fn extract_destructured(&mut self, index: usize, pattern: &'b ObjectPattern<'a>, object: ObjectType<'b, 'a>) {
        let mut pattern_removed = BTreeSet::new();
        let mut type_removed = BTreeSet::new();

        for (member_index, member) in object.members.iter().enumerate() {
            let Some((key, ty, span)) = property_member(member) else {
                continue;
            };
            let Classified::Injection(injection) = self.classify(ty, &key, span, 0) else {
                continue;
            };

            let property = pattern
                .properties
                .iter()
                .enumerate()
                .find(|(_, p)| !p.computed && property_key_name(&p.key).as_deref() == Some(key.as_str()));
            match property {
                Some((property_index, property)) => {
                    if self.bind(&property.value, &injection, property.span) {
                        pattern_removed.insert(property_index);
                        type_removed.insert(member_index);
                    }
                }
                None => {
                    type_removed.insert(member_index);
                }
            }
        }

        if type_removed.is_empty() {
            return;
        }

        let pattern_empty = pattern.rest.is_none() && pattern_removed.len() == pattern.properties.len();
        let type_empty = type_removed.len() == object.members.len();
        let member_spans: Vec<Span> = object.members.iter().map(|m| m.span()).collect();
        let plan = &mut self.outcome.signature;

        if pattern_empty && (type_empty || object.declaration.is_some()) {
            plan.removed_params.insert(index);
        } else {
            let mut elements: Vec<Span> = pattern.properties.iter().map(|p| p.span).collect();
            if let Some(rest) = &pattern.rest {
                elements.push(rest.span);
            }
            if !pattern_removed.is_empty() {
                plan.lists.push(ListRemoval {
                    elements,
                    removed: pattern_removed.clone(),
                });
            }
            if object.declaration.is_none() {
                plan.lists.push(ListRemoval {
                    elements: member_spans.clone(),
                    removed: type_removed.clone(),
                });
            }

            let mut kept = Vec::new();
            for (property_index, property) in pattern.properties.iter().enumerate() {
                if !pattern_removed.contains(&property_index) {
                    bound_names(&property.value, &mut kept);
                }
            }
            if let Some(rest) = &pattern.rest {
                bound_names(&rest.argument, &mut kept);
            }
            self.kept_names.insert(index, kept);
        }

        if object.declaration.is_some() {
            self.outcome.signature.lists.push(ListRemoval {
                elements: member_spans,
                removed: type_removed,
            });
        }
    }

    /// `props: { title: string; services: { ... } }`.
    fn extract_object_binding(&mut self, index: usize, id: &'b BindingIdentifier<'a>, object: ObjectType<'b, 'a>) {
        let mut entries = Vec::new();
        let mut type_removed = BTreeSet::new();
        let mut has_plain = false;

        for (member_index, member) in object.members.iter().enumerate() {
            let Some((key, ty, span)) = property_member(member) else {
                has_plain = true;
                continue;
            };
            match self.classify(ty, &key, span, 0) {
                Classified::Injection(injection) => {
                    entries.push((key, injection));
                    type_removed.insert(member_index);
                }
                Classified::Plain | Classified::Skipped => has_plain = true,
            }
        }

        if entries.is_empty() {
            return;
        }

        let name = id.name.to_string();
        let source = self.new_source();
        if !self.claim(&name, source, id.span) {
            return;
        }
        self.push_group(&name, &mut Vec::new(), &entries);

        let member_spans: Vec<Span> = object.members.iter().map(|m| m.span()).collect();
        if has_plain {
            let base = format!("__{}", name);
            self.claim(&base, source, id.span);
            // The binding span also covers the type annotation; rename the name only.
            let name_span = Span::new(id.span.start, id.span.start + name.len() as u32);
            self.outcome.signature.renames.push((name_span, base.clone()));
            self.outcome.spreads.push(GroupSpread { group: name, base });
            self.kept_names.insert(index, Vec::new());
            self.outcome.signature.lists.push(ListRemoval {
                elements: member_spans,
                removed: type_removed,
            });
        } else {
            self.outcome.signature.removed_params.insert(index);
            if object.declaration.is_some() {
                self.outcome.signature.lists.push(ListRemoval {
                    elements: member_spans,
                    removed: type_removed,
                });
            }
        }
    }

    /// Body bindings must not shadow a name the remaining parameters still bind.
    fn check_remaining_parameters(&mut self) {
        if self.outcome.dependencies.is_empty() {
            return;
        }
        let function = self.function;
        let mut remaining: Vec<(String, Span)> = Vec::new();
        for (index, param) in function.params.items.iter().enumerate() {
            if self.outcome.signature.removed_params.contains(&index) {
                continue;
            }
            let names = match self.kept_names.get(&index) {
                Some(kept) => kept.clone(),
                None => {
                    let mut names = Vec::new();
                    bound_names(&param.pattern, &mut names);
                    names
                }
            };
            remaining.extend(names.into_iter().map(|n| (n, param.span)));
        }
        if let Some(rest) = &function.params.rest {
            let mut names = Vec::new();
            bound_names(&rest.argument, &mut names);
            remaining.extend(names.into_iter().map(|n| (n, rest.span)));
        }

        let collisions: Vec<(String, Span)> = remaining
            .into_iter()
            .filter(|(name, _)| self.roots.contains_key(name))
            .collect();
        for (name, span) in collisions {
            self.collision(&name, span);
        }
    }
}
