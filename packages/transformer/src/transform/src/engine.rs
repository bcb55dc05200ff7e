use super::bindings::render_bindings;
use super::edits::{list_removal_ranges, EditSet};
use super::imports::{CallNames, RuntimeImports, UsedPrimitives};
use super::result::TransformationResult;
use crate::catalog::InterfaceCatalog;
use crate::diagnostics::{Diagnostic, ErrorCode, TransformError};
use crate::extractor::{extract, ExtractionOutcome, ListRemoval};
use crate::markers::{has_injection_markers, DetectionContext};
use crate::options::TransformerOptions;
use crate::source::{collect_function_likes, parse_source, FunctionLike, LocalTypes};
use oxc_allocator::Allocator;
use oxc_span::GetSpan;
use std::sync::Arc;

/// Edits for one function, applied only if they fit with the rest of the file.
#[derive(Debug, Default)]
pub struct ComponentEdits {
    pub edits: EditSet,
    pub used: UsedPrimitives,
    pub warnings: Vec<Diagnostic>,
}

/// Transforms files against a fixed catalog snapshot.
#[derive(Clone)]
pub struct Transformer {
    catalog: Arc<InterfaceCatalog>,
    options: Arc<TransformerOptions>,
}

impl Transformer {
    pub fn new(catalog: Arc<InterfaceCatalog>, options: Arc<TransformerOptions>) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &InterfaceCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &TransformerOptions {
        &self.options
    }

    pub fn transform(&self, input_text: &str, file_name: &str) -> TransformationResult {
        transform(input_text, file_name, &self.catalog, &self.options)
    }
}

/// Rewrite every injectable top-level function of `input_text`.
pub fn transform(
    input_text: &str,
    file_name: &str,
    catalog: &InterfaceCatalog,
    options: &TransformerOptions,
) -> TransformationResult {
    let allocator = Allocator::default();
    let program = match parse_source(&allocator, input_text, file_name) {
        Ok(program) => program,
        Err(err) => {
            return TransformationResult::failed(file_name, input_text, err.to_diagnostic().in_file(file_name));
        }
    };

    let local_types = LocalTypes::from_program(&program);
    let ctx = DetectionContext {
        markers: &options.markers,
        local_types: &local_types,
        text: input_text,
    };
    let imports = RuntimeImports::analyze(&program, &options.runtime);
    let names = imports.call_names(&options.runtime);

    let mut edits = EditSet::new();
    let mut used = UsedPrimitives::default();
    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut transformed = 0;

    for function in collect_function_likes(&program) {
        if !has_injection_markers(&function, &ctx) {
            warnings.push(
                Diagnostic::warning(
                    ErrorCode::NoInjectionMarkers,
                    format!("`{}` has no injection markers and is left unchanged", function.name),
                )
                .at(input_text, function.span),
            );
            continue;
        }

        let mut outcome = extract(&function, &ctx);
        warnings.append(&mut outcome.warnings);
        if !outcome.errors.is_empty() {
            errors.append(&mut outcome.errors);
            continue;
        }
        if outcome.dependencies.is_empty() {
            continue;
        }

        let component = match transform_component(&function, &outcome, catalog, &names, input_text) {
            Ok(component) => component,
            Err(err) => {
                errors.push(err.to_diagnostic().at(input_text, function.span));
                continue;
            }
        };
        match edits.merge(component.edits) {
            Ok(()) => {
                used.merge(component.used);
                warnings.extend(component.warnings);
                transformed += 1;
            }
            Err((start, end)) => {
                let err = TransformError::OverlappingEdits {
                    function: function.name.clone(),
                    start,
                    end,
                };
                errors.push(err.to_diagnostic().at(input_text, function.span));
            }
        }
    }

    if transformed > 0 {
        if let Err((start, end)) = edits.merge(imports.edits(used, &options.runtime)) {
            let err = TransformError::OverlappingEdits {
                function: "<imports>".to_string(),
                start,
                end,
            };
            errors.push(err.to_diagnostic());
        }
    }

    let code = edits.apply(input_text);
    let warnings = warnings.into_iter().map(|d| d.in_file(file_name)).collect();
    let errors = errors.into_iter().map(|d| d.in_file(file_name)).collect();
    TransformationResult::new(file_name, code, warnings, errors, transformed)
}

fn push_list_removal(edits: &mut EditSet, text: &str, list: &ListRemoval) {
    for (start, end) in list_removal_ranges(text, list) {
        edits.remove(start, end);
    }
}

/// Leading blanks of the line containing `offset`.
fn line_indent(text: &str, offset: u32) -> &str {
    let offset = (offset as usize).min(text.len());
    let line_start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = &text[line_start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

fn is_first_on_line(text: &str, offset: u32) -> bool {
    let offset = (offset as usize).min(text.len());
    let line_start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    text[line_start..offset].chars().all(|c| c == ' ' || c == '\t')
}

/// Bindings for `outcome` at the top of the body of `function`, and the signature
/// edits that drop what they replace.
pub fn transform_component(
    function: &FunctionLike,
    outcome: &ExtractionOutcome,
    catalog: &InterfaceCatalog,
    names: &CallNames,
    text: &str,
) -> Result<ComponentEdits, TransformError> {
    let rendered = render_bindings(outcome, catalog, names, text);
    let mut edits = EditSet::new();
    let plan = &outcome.signature;

    if !plan.removed_params.is_empty() {
        let (elements, offset) = function.parameter_spans();
        let list = ListRemoval {
            elements,
            removed: plan.removed_params.iter().map(|i| i + offset).collect(),
        };
        push_list_removal(&mut edits, text, &list);
    }
    for list in &plan.lists {
        push_list_removal(&mut edits, text, list);
    }
    for (span, name) in &plan.renames {
        edits.replace(span.start, span.end, name.clone());
    }

    let outer = line_indent(text, function.span.start).to_string();
    if function.expression_body {
        let expression = function.expression_span().ok_or_else(|| TransformError::Unsupported {
            function: function.name.clone(),
            reason: "arrow body is not a single expression".to_string(),
        })?;
        let inner = format!("{}  ", outer);
        let mut opening = String::from("{");
        for statement in &rendered.statements {
            opening.push_str(&format!("\n{}{}", inner, statement));
        }
        opening.push_str(&format!("\n{}return ", inner));
        edits.insert(expression.start, opening);
        edits.insert(expression.end, format!(";\n{}}}", outer));
    } else {
        let body = function.body;
        let open = body.span.start;
        if text.as_bytes().get(open as usize) != Some(&b'{') {
            return Err(TransformError::Unsupported {
                function: function.name.clone(),
                reason: "function body does not start with `{`".to_string(),
            });
        }

        let first = body
            .directives
            .first()
            .map(|d| d.span)
            .or_else(|| body.statements.first().map(|s| s.span()));
        let anchor = body.directives.last().map(|d| d.span.end).unwrap_or(open + 1);

        let insertion = match first {
            Some(first) if is_first_on_line(text, first.start) => {
                let indent = line_indent(text, first.start);
                rendered
                    .statements
                    .iter()
                    .map(|s| format!("\n{}{}", indent, s))
                    .collect::<String>()
            }
            Some(_) => rendered.statements.iter().map(|s| format!(" {}", s)).collect::<String>(),
            None => {
                let inner = format!("{}  ", outer);
                let mut insertion: String = rendered
                    .statements
                    .iter()
                    .map(|s| format!("\n{}{}", inner, s))
                    .collect();
                let between = text.get(open as usize + 1..body.span.end.saturating_sub(1) as usize).unwrap_or("");
                if !between.contains('\n') {
                    insertion.push('\n');
                    insertion.push_str(&outer);
                }
                insertion
            }
        };
        edits.insert(anchor, insertion);
    }

    if let Some((start, end)) = edits.first_conflict() {
        return Err(TransformError::OverlappingEdits {
            function: function.name.clone(),
            start,
            end,
        });
    }

    Ok(ComponentEdits {
        edits,
        used: rendered.used,
        warnings: rendered.warnings,
    })
}
