//! Project pipeline over a real directory

use di_transformer::diagnostics::ErrorCode;
use di_transformer::file_system::NodeJsFileSystem;
use di_transformer::options::TransformerOptions;
use di_transformer::project::Project;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn project_at(root: &Path) -> Project {
    let options = TransformerOptions {
        root_dir: root.to_string_lossy().to_string(),
        ..Default::default()
    };
    let provider = Arc::new(NodeJsFileSystem::from_options(&options));
    Project::new(options, provider)
}

fn seed(root: &Path) {
    write(
        root,
        "src/services/ApiService.ts",
        "@Service()\nexport class ApiService implements ApiInterface {\n  constructor(private http: Inject<HttpClient>) {}\n}\n",
    );
    write(
        root,
        "src/services/FetchClient.ts",
        "@Injectable()\nexport class FetchClient implements HttpClient {}\n",
    );
    write(
        root,
        "src/components/App.tsx",
        "export function App({ api }: { api: Inject<ApiInterface> }) {\n  return api;\n}\n",
    );
}

#[test]
fn should_build_project_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    let report = project_at(dir.path()).build();
    assert!(!report.has_errors(), "{:?}", report.all_diagnostics().collect::<Vec<_>>());
    assert_eq!(report.transformed_components(), 1);

    let app = fs::read_to_string(dir.path().join("src/components/App.tsx")).unwrap();
    assert!(app.contains("export function App() {"));
    assert!(app.contains("useService(\"ApiInterface__src_services_ApiService\")"));

    let config = fs::read_to_string(dir.path().join("src/.di/di-config.ts")).unwrap();
    assert!(config.contains("import { ApiService } from \"../services/ApiService\";"));
    assert!(config.contains("return new ApiService(container.resolve(\"HttpClient__src_services_FetchClient\"));"));
}

#[test]
fn should_tolerate_one_unparsable_file() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/A.tsx",
        "export function A({ s }: { s: Inject<S> }) { return s; }\n",
    );
    write(dir.path(), "src/B.tsx", "export function B(\n");
    write(
        dir.path(),
        "src/C.tsx",
        "export function C({ s }: { s: Inject<S> }) { return s; }\n",
    );

    let project = project_at(dir.path());
    let loaded = project.load_units();
    assert_eq!(loaded.units.len(), 3);
    let results = project.transform_units(&loaded.units);
    let succeeded: Vec<&str> = results
        .iter()
        .filter(|r| r.success)
        .map(|r| r.file_name.as_str())
        .collect();
    assert_eq!(succeeded, vec!["src/A.tsx", "src/C.tsx"]);
    let failed = results.iter().find(|r| !r.success).unwrap();
    assert_eq!(failed.errors[0].code, ErrorCode::ParseError);
}

#[test]
fn should_generate_identical_configuration_twice() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let project = project_at(dir.path());

    let (loaded, _) = project.rescan();
    let first = project.generate(&loaded.units).render();
    let (loaded, _) = project.rescan();
    let second = project.generate(&loaded.units).render();
    assert_eq!(first, second);
}

#[test]
fn should_build_again_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let project = project_at(dir.path());

    project.build();
    let app = fs::read_to_string(dir.path().join("src/components/App.tsx")).unwrap();
    let second = project.build();
    assert_eq!(second.transformed_components(), 0);
    assert_eq!(
        fs::read_to_string(dir.path().join("src/components/App.tsx")).unwrap(),
        app
    );
    let config = fs::read_to_string(dir.path().join("src/.di/di-config.ts")).unwrap();
    assert!(config.contains("export function createApiService(container: DIContainer) {"));
    assert!(config.contains("export function createFetchClient(container: DIContainer) {"));
}
