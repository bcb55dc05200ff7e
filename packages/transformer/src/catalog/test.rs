#[cfg(test)]
mod tests {
    use crate::catalog::*;
    use crate::diagnostics::ErrorCode;
    use crate::options::{AmbiguityPolicy, TransformerOptions};
    use crate::source::SourceUnit;

    fn unit(path: &str, text: &str) -> SourceUnit {
        SourceUnit::new(path, text)
    }

    fn codes(catalog: &InterfaceCatalog) -> Vec<ErrorCode> {
        catalog.diagnostics().iter().map(|d| d.code).collect()
    }

    mod registration_tests {
        use super::*;

        #[test]
        fn should_register_decorated_class_under_each_interface() {
            let catalog = scan(
                &[unit(
                    "src/services/CounterService.ts",
                    r#"
@Service()
export class CounterService implements CounterServiceInterface, Resettable {
    count = 0;
}
"#,
                )],
                &TransformerOptions::default(),
            );
            let record = catalog.lookup("CounterServiceInterface").unwrap();
            assert_eq!(record.implementation_class_name, "CounterService");
            assert_eq!(record.source_file_path, "src/services/CounterService.ts");
            assert_eq!(record.scope, LifecycleScope::Singleton);
            assert_eq!(
                record.sanitized_token,
                "CounterServiceInterface__src_services_CounterService"
            );
            assert!(catalog.lookup("Resettable").is_some());
            assert_eq!(
                catalog.lookup("CounterService").unwrap().registration,
                RegistrationKind::SelfClass
            );
            assert!(catalog.diagnostics().is_empty());
        }

        #[test]
        fn should_ignore_undecorated_classes() {
            let catalog = scan(
                &[unit("a.ts", "export class Plain implements Api {}")],
                &TransformerOptions::default(),
            );
            assert!(catalog.is_empty());
        }

        #[test]
        fn should_read_decorator_options() {
            let catalog = scan(
                &[unit(
                    "a.ts",
                    r#"
@Service({ scope: "transient", primary: true })
class A implements Api {}

@Injectable()
@Scope("scoped")
@Primary()
class B implements Store {}
"#,
                )],
                &TransformerOptions::default(),
            );
            let a = catalog.lookup("Api").unwrap();
            assert_eq!(a.scope, LifecycleScope::Transient);
            assert!(a.is_primary);
            let b = catalog.lookup("Store").unwrap();
            assert_eq!(b.scope, LifecycleScope::Scoped);
            assert!(b.is_primary);
        }

        #[test]
        fn should_register_base_classes_when_enabled() {
            let text = "@Service() export class ConsoleLogger extends Logger {}";
            let catalog = scan(&[unit("a.ts", text)], &TransformerOptions::default());
            assert_eq!(
                catalog.lookup("Logger").unwrap().registration,
                RegistrationKind::BaseClass
            );

            let options = TransformerOptions {
                register_base_classes: false,
                ..Default::default()
            };
            let catalog = scan(&[unit("a.ts", text)], &options);
            assert!(catalog.lookup("Logger").is_none());
        }

        #[test]
        fn should_record_generic_implementations() {
            let catalog = scan(
                &[unit(
                    "src/repo.ts",
                    "@Service() export class UserRepository<T, K> implements Repository<User> {}",
                )],
                &TransformerOptions::default(),
            );
            let record = catalog.lookup("Repository<User>").unwrap();
            assert!(record.is_generic);
            assert_eq!(record.type_parameters, vec!["T", "K"]);
            assert_eq!(record.sanitized_token, "Repository_User___src_repo");
        }

        #[test]
        fn should_collect_constructor_dependencies() {
            let catalog = scan(
                &[unit(
                    "a.ts",
                    r#"
@Service()
class UserService implements Users {
    constructor(private readonly api: Inject<Api>, label: string, logger?: InjectOptional<Logger>) {}
}
"#,
                )],
                &TransformerOptions::default(),
            );
            let deps = &catalog.lookup("Users").unwrap().constructor_dependencies;
            assert_eq!(deps.len(), 2);
            assert_eq!((deps[0].index, deps[0].interface_name.as_str(), deps[0].optional), (0, "Api", false));
            assert_eq!((deps[1].index, deps[1].interface_name.as_str(), deps[1].optional), (2, "Logger", true));
        }

        #[test]
        fn should_keep_scanning_after_a_parse_error() {
            let catalog = scan(
                &[
                    unit("broken.ts", "class {"),
                    unit("ok.ts", "@Service() class Ok implements Api {}"),
                ],
                &TransformerOptions::default(),
            );
            assert_eq!(codes(&catalog), vec![ErrorCode::ParseError]);
            assert_eq!(catalog.diagnostics()[0].file.as_deref(), Some("broken.ts"));
            assert!(catalog.lookup("Api").is_some());
        }
    }

    mod conflict_tests {
        use super::*;

        const FOO: &str = "@Service() export class Foo implements X {}";
        const BAR: &str = "@Service() export class Bar implements X {}";

        #[test]
        fn should_report_ambiguity_and_keep_last_registered() {
            let catalog = scan(&[unit("src/foo.ts", FOO), unit("src/bar.ts", BAR)], &TransformerOptions::default());
            assert_eq!(codes(&catalog), vec![ErrorCode::AmbiguousImplementation]);
            let message = &catalog.diagnostics()[0].message_text;
            assert!(message.contains("Foo (src/foo.ts)"));
            assert!(message.contains("Bar (src/bar.ts)"));
            assert_eq!(catalog.lookup("X").unwrap().implementation_class_name, "Bar");
            let names: Vec<_> = catalog.implementations_of("X").iter().map(|c| c.class_name.as_str()).collect();
            assert_eq!(names, vec!["Foo", "Bar"]);
        }

        #[test]
        fn should_keep_first_registered_under_first_wins_policy() {
            let options = TransformerOptions {
                ambiguity_policy: AmbiguityPolicy::FirstRegisteredWins,
                ..Default::default()
            };
            let catalog = scan(&[unit("src/foo.ts", FOO), unit("src/bar.ts", BAR)], &options);
            assert_eq!(codes(&catalog), vec![ErrorCode::AmbiguousImplementation]);
            assert_eq!(catalog.lookup("X").unwrap().implementation_class_name, "Foo");
        }

        #[test]
        fn should_prefer_primary_silently() {
            let primary = "@Service({ primary: true }) export class Foo implements X {}";
            for units in [
                vec![unit("src/foo.ts", primary), unit("src/bar.ts", BAR)],
                vec![unit("src/bar.ts", BAR), unit("src/foo.ts", primary)],
            ] {
                let catalog = scan(&units, &TransformerOptions::default());
                assert!(catalog.diagnostics().is_empty());
                assert_eq!(catalog.lookup("X").unwrap().implementation_class_name, "Foo");
            }
        }

        #[test]
        fn should_reject_two_primaries() {
            let a = "@Service() @Primary() export class Foo implements X {}";
            let b = "@Service() @Primary() export class Bar implements X {}";
            let catalog = scan(&[unit("a.ts", a), unit("b.ts", b)], &TransformerOptions::default());
            assert_eq!(codes(&catalog), vec![ErrorCode::MultiplePrimaryImplementations]);
            assert!(catalog.has_errors());
        }

        #[test]
        fn should_keep_qualified_records_apart() {
            let qualified = r#"@Service() @Qualifier("fast") export class FastX implements X {}"#;
            let catalog = scan(
                &[unit("src/foo.ts", FOO), unit("src/fast.ts", qualified)],
                &TransformerOptions::default(),
            );
            assert!(catalog.diagnostics().is_empty());
            assert_eq!(catalog.lookup("X").unwrap().implementation_class_name, "Foo");
            assert_eq!(
                catalog.lookup_qualified("X", "fast").unwrap().implementation_class_name,
                "FastX"
            );
        }

        #[test]
        fn should_list_qualified_implementations_of_interface() {
            let fast = r#"@Service() @Qualifier("fast") export class FastX implements X {}"#;
            let slow = r#"@Service({ qualifier: "slow" }) export class SlowX implements X {}"#;
            let catalog = scan(
                &[unit("src/foo.ts", FOO), unit("src/fast.ts", fast), unit("src/slow.ts", slow)],
                &TransformerOptions::default(),
            );
            let qualified: Vec<(&str, &str)> = catalog
                .qualified_of("X")
                .into_iter()
                .map(|(q, r)| (q, r.implementation_class_name.as_str()))
                .collect();
            assert_eq!(qualified, vec![("fast", "FastX"), ("slow", "SlowX")]);
            assert!(catalog.qualified_of("Y").is_empty());
        }

        #[test]
        fn should_serve_bare_name_from_single_qualified_record() {
            let qualified = r#"@Service({ qualifier: "fast" }) export class FastX implements X {}"#;
            let catalog = scan(&[unit("src/fast.ts", qualified)], &TransformerOptions::default());
            assert_eq!(catalog.lookup("X").unwrap().implementation_class_name, "FastX");
            assert_eq!(catalog.token_for("X"), Some("X__src_fast"));
        }
    }
}
