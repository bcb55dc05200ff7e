#[cfg(test)]
mod tests {
    use crate::diagnostics::ErrorCode;
    use crate::file_system::InMemoryFileSystem;
    use crate::logging::{LogLevel, Logger};
    use crate::options::TransformerOptions;
    use crate::project::*;
    use std::sync::{Arc, Mutex};

    const SERVICE: &str = r#"@Service()
export class CounterService implements CounterServiceInterface {
  count = 0;
}
"#;

    const COMPONENT: &str = r#"export function Counter({ counterService }: { counterService: Inject<CounterServiceInterface> }) {
  return counterService.count;
}
"#;

    #[derive(Default)]
    struct RecordingLogger {
        lines: Mutex<Vec<(LogLevel, String)>>,
    }

    impl RecordingLogger {
        fn record(&self, level: LogLevel, msg: &str) {
            self.lines.lock().unwrap().push((level, msg.to_string()));
        }

        fn count(&self, level: LogLevel) -> usize {
            self.lines.lock().unwrap().iter().filter(|(l, _)| *l == level).count()
        }
    }

    impl Logger for RecordingLogger {
        fn level(&self) -> LogLevel {
            LogLevel::Debug
        }

        fn log(&self, level: LogLevel, msg: &str) {
            self.record(level, msg)
        }
    }

    fn project(files: &[(&str, &str)]) -> (Project, Arc<InMemoryFileSystem>) {
        let fs = Arc::new(InMemoryFileSystem::with_files(files.iter().copied()));
        (Project::new(TransformerOptions::default(), fs.clone()), fs)
    }

    mod catalog_tests {
        use super::*;

        #[test]
        fn should_start_with_empty_catalog() {
            let (project, _) = project(&[("src/CounterService.ts", SERVICE)]);
            assert!(project.catalog().is_empty());
        }

        #[test]
        fn should_publish_rescanned_catalog() {
            let (project, fs) = project(&[("src/CounterService.ts", SERVICE)]);
            let before = project.catalog();
            let (loaded, catalog) = project.rescan();
            assert_eq!(loaded.units.len(), 1);
            assert!(catalog.lookup("CounterServiceInterface").is_some());
            assert!(before.is_empty());

            fs.remove_file("src/CounterService.ts");
            project.rescan();
            assert!(project.catalog().is_empty());
            assert!(catalog.lookup("CounterServiceInterface").is_some());
        }

        #[test]
        fn should_skip_generated_configuration() {
            let (project, _) = project(&[
                ("src/.di/di-config.ts", "export const DI_CONFIG = {};"),
                ("src/Counter.tsx", COMPONENT),
            ]);
            let loaded = project.load_units();
            let paths: Vec<&str> = loaded.units.iter().map(|u| u.path.as_str()).collect();
            assert_eq!(paths, vec!["src/Counter.tsx"]);
        }
    }

    mod build_tests {
        use super::*;

        #[test]
        fn should_build_in_place() {
            let (project, fs) = project(&[
                ("src/CounterService.ts", SERVICE),
                ("src/Counter.tsx", COMPONENT),
            ]);
            let report = project.build();
            assert!(!report.has_errors());
            assert_eq!(report.transformed_components(), 1);
            assert_eq!(report.written, vec!["src/Counter.tsx", "src/.di/di-config.ts"]);

            let counter = fs.read("src/Counter.tsx").unwrap();
            assert!(counter.contains(
                r#"const counterService = useService("CounterServiceInterface__src_CounterService");"#
            ));
            assert_eq!(fs.read("src/CounterService.ts").unwrap(), SERVICE);
            let config = fs.read("src/.di/di-config.ts").unwrap();
            assert!(config.contains(r#"import { CounterService } from "../CounterService";"#));
        }

        #[test]
        fn should_mirror_into_out_dir() {
            let fs = Arc::new(InMemoryFileSystem::with_files([
                ("src/CounterService.ts", SERVICE),
                ("src/Counter.tsx", COMPONENT),
            ]));
            let options = TransformerOptions {
                out_dir: Some("dist".to_string()),
                ..Default::default()
            };
            let report = Project::new(options, fs.clone()).build();
            assert!(report.written.contains(&"dist/src/Counter.tsx".to_string()));
            assert!(report.written.contains(&"dist/src/CounterService.ts".to_string()));
            assert_eq!(fs.read("src/Counter.tsx").unwrap(), COMPONENT);
        }

        #[test]
        fn should_report_missing_implementations() {
            let (project, _) = project(&[("src/Counter.tsx", COMPONENT)]);
            let report = project.build();
            assert!(report.has_errors());
            let codes: Vec<ErrorCode> = report.all_diagnostics().map(|d| d.code).collect();
            assert!(codes.contains(&ErrorCode::MissingImplementation));
            assert!(codes.contains(&ErrorCode::UnresolvedInterface));
        }

        #[test]
        fn should_log_through_given_logger() {
            let logger = Arc::new(RecordingLogger::default());
            let (project, _) = project(&[
                ("src/CounterService.ts", SERVICE),
                ("src/Counter.tsx", COMPONENT),
                ("src/Broken.ts", "export function ("),
            ]);
            let report = project.with_logger(logger.clone()).build();
            assert!(report.has_errors());
            assert!(logger.count(LogLevel::Info) >= 3);
            assert!(logger.count(LogLevel::Error) >= 1);
        }
    }
}
