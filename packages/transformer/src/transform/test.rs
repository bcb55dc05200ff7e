#[cfg(test)]
mod tests {
    use crate::catalog::{scan, InterfaceCatalog};
    use crate::diagnostics::ErrorCode;
    use crate::options::TransformerOptions;
    use crate::source::SourceUnit;
    use crate::transform::*;

    fn run(text: &str) -> TransformationResult {
        transform(text, "src/components/Component.tsx", &InterfaceCatalog::new(), &TransformerOptions::default())
    }

    fn warning_codes(result: &TransformationResult) -> Vec<ErrorCode> {
        result.warnings.iter().map(|d| d.code).collect()
    }

    mod edit_set_tests {
        use super::*;
        use crate::extractor::ListRemoval;
        use oxc_span::Span;

        #[test]
        fn should_apply_edits_in_offset_order() {
            let mut edits = EditSet::new();
            edits.replace(6, 11, "there");
            edits.insert(0, ">> ");
            edits.insert(11, "!");
            assert_eq!(edits.apply("hello world"), ">> hello there!");
        }

        #[test]
        fn should_keep_insertion_order_at_same_offset() {
            let mut edits = EditSet::new();
            edits.insert(1, "a");
            edits.insert(1, "b");
            assert_eq!(edits.apply("xy"), "xaby");
        }

        #[test]
        fn should_reject_overlapping_merges_atomically() {
            let mut edits = EditSet::new();
            edits.remove(2, 6);
            let mut other = EditSet::new();
            other.insert(0, "ok");
            other.remove(4, 8);
            assert_eq!(edits.merge(other), Err((2, 8)));
            assert_eq!(edits.len(), 1);
        }

        #[test]
        fn should_drop_duplicate_edits_on_merge() {
            let mut edits = EditSet::new();
            edits.remove(2, 6);
            let mut other = EditSet::new();
            other.remove(2, 6);
            assert!(edits.merge(other).is_ok());
            assert_eq!(edits.len(), 1);
        }

        fn spans(text: &str, items: &[&str]) -> Vec<Span> {
            items
                .iter()
                .map(|item| {
                    let start = text.find(item).unwrap() as u32;
                    Span::new(start, start + item.len() as u32)
                })
                .collect()
        }

        fn remove(text: &str, items: &[&str], removed: &[usize]) -> String {
            let list = ListRemoval {
                elements: spans(text, items),
                removed: removed.iter().copied().collect(),
            };
            let mut edits = EditSet::new();
            for (start, end) in list_removal_ranges(text, &list) {
                edits.remove(start, end);
            }
            edits.apply(text)
        }

        #[test]
        fn should_remove_list_elements_with_their_separators() {
            let text = "(a: A, b: B, c: C)";
            let items = ["a: A", "b: B", "c: C"];
            assert_eq!(remove(text, &items, &[0]), "(b: B, c: C)");
            assert_eq!(remove(text, &items, &[1]), "(a: A, c: C)");
            assert_eq!(remove(text, &items, &[2]), "(a: A, b: B)");
            assert_eq!(remove(text, &items, &[1, 2]), "(a: A)");
            assert_eq!(remove(text, &items, &[0, 1, 2]), "()");
        }

        #[test]
        fn should_remove_last_line_of_a_multiline_list() {
            let text = "{\n  a: Inject<A>;\n}";
            assert_eq!(remove(text, &["a: Inject<A>"], &[0]), "{\n}");
        }
    }

    mod scenario_tests {
        use super::*;

        #[test]
        fn should_rewrite_destructured_counter_service() {
            let input = "function Counter({ counterService }: { counterService: Inject<CounterServiceInterface> }) {\n  return counterService.count;\n}\n";
            let result = run(input);
            assert_eq!(
                result.transformed_code,
                "import { useService } from \"@di-transformer/runtime\";\nfunction Counter() {\n  const counterService = useService(\"CounterServiceInterface\");\n  return counterService.count;\n}\n"
            );
            assert!(result.success);
            assert_eq!(result.stats.transformed_components, 1);
            assert_eq!(warning_codes(&result), vec![ErrorCode::UnresolvedInterface]);
        }

        #[test]
        fn should_use_catalog_tokens() {
            let catalog = scan(
                &[SourceUnit::new(
                    "src/services/CounterService.ts",
                    "@Service() export class CounterService implements CounterServiceInterface {}",
                )],
                &TransformerOptions::default(),
            );
            let result = transform(
                "function Counter({ counterService }: { counterService: Inject<CounterServiceInterface> }) { return null; }",
                "src/Counter.tsx",
                &catalog,
                &TransformerOptions::default(),
            );
            assert!(result
                .transformed_code
                .contains(r#"const counterService = useService("CounterServiceInterface__src_services_CounterService");"#));
            assert!(result.warnings.is_empty());
        }

        #[test]
        fn should_bind_required_then_optional_in_field_order() {
            let input = "export const Panel = ({ api, logger }: { api: Inject<ApiInterface>; logger: InjectOptional<Logger> }) => {\n  return null;\n};\n";
            let result = run(input);
            assert_eq!(
                result.transformed_code,
                "import { useService, useOptionalService } from \"@di-transformer/runtime\";\nexport const Panel = () => {\n  const api = useService(\"ApiInterface\");\n  const logger = useOptionalService(\"Logger\");\n  return null;\n};\n"
            );
        }

        #[test]
        fn should_leave_functions_without_markers_untouched() {
            let input = "function RegularComponent({ title }: { title: string }) {\n  return title;\n}\n";
            let result = run(input);
            assert_eq!(result.transformed_code, input);
            assert_eq!(result.stats.transformed_components, 0);
            assert_eq!(warning_codes(&result), vec![ErrorCode::NoInjectionMarkers]);
            assert!(result.success);
        }

        #[test]
        fn should_bind_services_group_as_one_object() {
            let input = "function Dashboard({ services }: { services: { api: Inject<Api>; logger: InjectOptional<Logger> } }) {\n  return services.api;\n}\n";
            let result = run(input);
            assert!(result.transformed_code.contains(
                r#"  const services = { api: useService("Api"), logger: useOptionalService("Logger") };"#
            ));
            assert!(result.transformed_code.contains("function Dashboard() {"));
        }
    }

    mod shape_tests {
        use super::*;

        #[test]
        fn should_convert_expression_bodied_arrows() {
            let result = run("const Label = ({ api }: { api: Inject<Api> }) => api.name;\n");
            assert_eq!(
                result.transformed_code,
                "import { useService } from \"@di-transformer/runtime\";\nconst Label = () => {\n  const api = useService(\"Api\");\n  return api.name;\n};\n"
            );
        }

        #[test]
        fn should_fill_empty_bodies() {
            let result = run("function F({ api }: { api: Inject<Api> }) {}");
            assert!(result.transformed_code.ends_with("function F() {\n  const api = useService(\"Api\");\n}"));
        }

        #[test]
        fn should_keep_single_line_bodies_on_one_line() {
            let result = run("function F({ api }: { api: Inject<Api> }) { return api; }");
            assert!(result
                .transformed_code
                .ends_with(r#"function F() { const api = useService("Api"); return api; }"#));
        }

        #[test]
        fn should_keep_plain_props() {
            let result = run("function Title({ title, api }: { title: string; api: Inject<Api> }) {\n  return title;\n}");
            let code = &result.transformed_code;
            assert!(code.contains("function Title({ title }: { title: string"));
            assert!(!code.contains("Inject<Api>"));
        }

        #[test]
        fn should_spread_identifier_props() {
            let result = run("function Card(props: { title: string; api: Inject<Api> }) {\n  return props.title;\n}");
            let code = &result.transformed_code;
            assert!(code.contains("function Card(__props: { title: string"));
            assert!(code.contains(r#"  const props = { ...__props, api: useService("Api") };"#));
            assert!(result.success);
            assert_eq!(result.stats.transformed_components, 1);
        }

        #[test]
        fn should_keep_annotation_when_renaming_props() {
            let input = "interface P {\n  title: string;\n  api: Inject<Api>;\n}\nfunction Card(props: P) {\n  return props.title;\n}\n";
            let result = run(input);
            assert!(result.success, "{:?}", result.errors);
            assert_eq!(result.stats.transformed_components, 1);
            let code = &result.transformed_code;
            assert!(code.contains("function Card(__props: P) {"));
            assert!(code.contains("interface P {\n  title: string"));
            assert!(!code.contains("Inject<"));
            assert!(code.contains(r#"  const props = { ...__props, api: useService("Api") };"#));
        }

        #[test]
        fn should_edit_same_file_props_interface() {
            let input = "interface CounterProps {\n  label: string;\n  counterService: Inject<CounterServiceInterface>;\n}\nexport function Counter({ label, counterService }: CounterProps) {\n  return label;\n}\n";
            let result = run(input);
            let code = &result.transformed_code;
            assert!(code.contains("export function Counter({ label }: CounterProps) {"));
            assert!(code.contains("interface CounterProps {\n  label: string"));
            assert!(!code.contains("Inject<"));
        }

        #[test]
        fn should_remove_marker_parameters() {
            let result = run("export function useUsers(limit: number, repo: Inject<Repository<User>>) {\n  return repo.list(limit);\n}");
            assert!(result.transformed_code.contains("export function useUsers(limit: number) {"));
            assert!(result.transformed_code.contains(r#"const repo = useService("Repository<User>");"#));
        }

        #[test]
        fn should_apply_destructuring_defaults() {
            let result = run("function F({ logger = console }: { logger: InjectOptional<Logger> }) { return logger; }");
            assert!(result
                .transformed_code
                .contains(r#"const logger = useOptionalService("Logger") ?? console;"#));
        }
    }

    mod import_tests {
        use super::*;

        #[test]
        fn should_extend_existing_runtime_import() {
            let input = "import { useService } from \"@di-transformer/runtime\";\nfunction F({ api, log }: { api: Inject<Api>; log: InjectOptional<Log> }) {\n  return api;\n}\n";
            let result = run(input);
            assert!(result
                .transformed_code
                .starts_with("import { useService, useOptionalService } from \"@di-transformer/runtime\";\nfunction F() {"));
            assert_eq!(result.transformed_code.matches("import").count(), 1);
        }

        #[test]
        fn should_reuse_aliased_primitives() {
            let input = "import { useService as resolve } from \"@di-transformer/runtime\";\nfunction F({ api }: { api: Inject<Api> }) { return api; }";
            let result = run(input);
            assert!(result.transformed_code.contains(r#"const api = resolve("Api");"#));
            assert_eq!(result.transformed_code.matches("import").count(), 1);
        }

        #[test]
        fn should_add_import_after_last_import() {
            let input = "import React from \"react\";\nimport { x } from \"./x\";\n\nfunction F({ api }: { api: Inject<Api> }) { return api; }";
            let result = run(input);
            assert!(result.transformed_code.starts_with(
                "import React from \"react\";\nimport { x } from \"./x\";\nimport { useService } from \"@di-transformer/runtime\";\n\nfunction F()"
            ));
        }

        #[test]
        fn should_add_import_after_directive_prologue() {
            let input = "\"use client\";\n\nfunction F({ api }: { api: Inject<Api> }) { return api; }";
            let result = run(input);
            assert!(result
                .transformed_code
                .starts_with("\"use client\";\nimport { useService } from \"@di-transformer/runtime\";"));
        }

        #[test]
        fn should_not_import_when_nothing_was_transformed() {
            let input = "function F({ a }: { a: Inject<A | B> }) { return a; }";
            let result = run(input);
            assert_eq!(result.transformed_code, input);
            assert_eq!(warning_codes(&result), vec![ErrorCode::UnresolvableMarkerArgument]);
        }
    }

    mod failure_tests {
        use super::*;

        #[test]
        fn should_report_parse_errors_without_output_changes() {
            let input = "function (";
            let result = run(input);
            assert!(!result.success);
            assert_eq!(result.transformed_code, input);
            assert_eq!(result.errors[0].code, ErrorCode::ParseError);
            assert!(result.error.is_some());
        }

        #[test]
        fn should_scope_errors_to_the_failing_function() {
            let input = "function Bad({ api }: { api: Inject<A> }, api2: number, { services: { api } }: { services: { api: Inject<B> } }) {}\nfunction Good({ api }: { api: Inject<A> }) { return api; }\n";
            let result = run(input);
            assert!(!result.success);
            assert_eq!(result.stats.transformed_components, 1);
            assert_eq!(result.errors[0].code, ErrorCode::BindingNameCollision);
            assert_eq!(result.errors[0].file.as_deref(), Some("src/components/Component.tsx"));
            assert!(result.transformed_code.contains("function Good() {"));
            assert!(result.transformed_code.contains("function Bad({ api }: { api: Inject<A> }"));
        }

        #[test]
        fn should_serialize_result_in_camel_case() {
            let json = run("const X = () => 1;").to_json().unwrap();
            assert!(json.contains("\"transformedCode\""));
            assert!(json.contains("\"transformedComponents\":0"));
            assert!(json.contains("\"code\":\"DI4001\""));
            assert!(!json.contains("\"error\""));
        }
    }

    mod idempotence_tests {
        use super::*;

        #[test]
        fn should_be_a_no_op_on_transformed_output() {
            let input = "import React from \"react\";\n\nexport const Panel = ({ title, services }: { title: string; services: { api: Inject<Api> } }) => (\n  <div>{title}</div>\n);\n";
            let first = run(input);
            assert_eq!(first.stats.transformed_components, 1);
            let second = run(&first.transformed_code);
            assert_eq!(second.transformed_code, first.transformed_code);
            assert_eq!(second.stats.transformed_components, 0);
        }

        #[test]
        fn should_be_deterministic() {
            let input = "function F({ b, a }: { a: Inject<A>; b: InjectOptional<B> }) { return a; }";
            assert_eq!(run(input), run(input));
        }
    }
}
