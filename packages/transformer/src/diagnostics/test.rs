// Diagnostics Tests

#[cfg(test)]
mod tests {
    use crate::diagnostics::*;
    use oxc_span::Span;

    mod error_code_tests {
        use super::*;

        #[test]
        fn should_prefix_codes_with_di() {
            assert_eq!(di_error_code(ErrorCode::NoInjectionMarkers), "DI4001");
            assert_eq!(ErrorCode::MissingImplementation.to_string(), "DI3001");
        }

        #[test]
        fn should_serialize_code_as_string() {
            let json = serde_json::to_string(&ErrorCode::ParseError).unwrap();
            assert_eq!(json, "\"DI1001\"");
        }
    }

    mod transform_error_tests {
        use super::*;
        use std::io;

        #[test]
        fn should_keep_read_and_write_failures_apart() {
            let read = TransformError::Read {
                path: "src/a.ts".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            };
            let write = TransformError::Write {
                path: "src/a.ts".to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            };
            assert_eq!(read.code(), ErrorCode::ReadError);
            assert_eq!(write.code(), ErrorCode::WriteError);
            assert_eq!(write.to_diagnostic().code.to_string(), "DI1003");
        }

        #[test]
        fn should_map_binding_collision_to_its_code() {
            let err = TransformError::BindingCollision {
                function: "Card".to_string(),
                name: "api".to_string(),
            };
            let diag = err.to_diagnostic();
            assert_eq!(diag.code, ErrorCode::BindingNameCollision);
            assert_eq!(diag.message_text, "binding `api` would be declared more than once in `Card`");
        }
    }

    mod diagnostic_tests {
        use super::*;

        #[test]
        fn should_compute_line_and_column() {
            let text = "line one\nline two\n  third";
            assert_eq!(line_and_column(text, 0), (1, 1));
            assert_eq!(line_and_column(text, 9), (2, 1));
            assert_eq!(line_and_column(text, 20), (3, 3));
        }

        #[test]
        fn should_anchor_to_span() {
            let text = "const a = 1;\nfunction F() {}";
            let diag = Diagnostic::warning(ErrorCode::NoInjectionMarkers, "nothing to do")
                .in_file("a.ts")
                .at(text, Span::new(13, 28));
            assert_eq!(diag.line, Some(2));
            assert_eq!(diag.column, Some(1));
            assert_eq!(diag.length, Some(15));
            assert_eq!(diag.to_string(), "a.ts:2:1 - warning DI4001: nothing to do");
        }

        #[test]
        fn should_render_without_location() {
            let diag = Diagnostic::error(ErrorCode::MissingImplementation, "no implementation for B");
            assert_eq!(diag.to_string(), "error DI3001: no implementation for B");
            assert!(diag.is_error());
            assert!(!diag.is_warning());
        }
    }

    mod format_tests {
        use super::*;

        #[test]
        fn should_list_errors_before_warnings() {
            let diagnostics = vec![
                Diagnostic::warning(ErrorCode::NoInjectionMarkers, "w1"),
                Diagnostic::error(ErrorCode::ParseError, "e1"),
                Diagnostic::warning(ErrorCode::UnresolvedInterface, "w2"),
            ];
            let out = format_diagnostics(&diagnostics);
            let lines: Vec<_> = out.lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines[0].contains("e1"));
            assert!(lines[1].contains("w1"));
            assert!(lines[2].contains("w2"));
            assert_eq!(count_errors(&diagnostics), 1);
            assert_eq!(count_warnings(&diagnostics), 2);
        }
    }
}
