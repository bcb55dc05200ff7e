#![deny(clippy::all)]

use di_transformer::catalog::InterfaceCatalog;
use di_transformer::diagnostics::Diagnostic;
use di_transformer::file_system::InMemoryFileSystem;
use di_transformer::options::TransformerOptions;
use di_transformer::project::Project;
use napi::{Error, Result, Status};
use napi_derive::napi;
use serde::Serialize;
use std::sync::Arc;

fn parse_options(options_json: Option<String>) -> Result<TransformerOptions> {
    match options_json {
        Some(json) if !json.trim().is_empty() => TransformerOptions::from_json(&json, "<options>")
            .map_err(|e| Error::new(Status::InvalidArg, e.to_string())),
        _ => Ok(TransformerOptions::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::new(Status::GenericFailure, e.to_string()))
}

/// Transform one file without a catalog; tokens fall back to interface names.
#[napi]
pub fn transform(source_text: String, file_name: String, options_json: Option<String>) -> Result<String> {
    let options = parse_options(options_json)?;
    let result = di_transformer::transform(&source_text, &file_name, &InterfaceCatalog::new(), &options);
    to_json(&result)
}

#[napi(object)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedModule<'a> {
    output_path: &'a str,
    code: String,
    diagnostics: &'a [Diagnostic],
}

/// A project held in memory by the host bundler: `scan` feeds it files, `transform`
/// rewrites against the catalog they produced.
#[napi]
pub struct Transformer {
    files: Arc<InMemoryFileSystem>,
    project: Project,
}

#[napi]
impl Transformer {
    #[napi(constructor)]
    pub fn new(options_json: Option<String>) -> Result<Self> {
        let options = parse_options(options_json)?;
        let files = Arc::new(InMemoryFileSystem::new());
        let project = Project::new(options, files.clone());
        Ok(Transformer { files, project })
    }

    /// Add or replace `files` and rebuild the catalog. Returns the catalog as JSON.
    #[napi]
    pub fn scan(&self, files: Vec<SourceFile>) -> Result<String> {
        for file in files {
            self.files.add_file(&file.path, file.text);
        }
        let (_, catalog) = self.project.rescan();
        to_json(catalog.as_ref())
    }

    #[napi]
    pub fn transform(&self, source_text: String, file_name: String) -> Result<String> {
        to_json(&self.project.transform_file(&source_text, &file_name))
    }

    /// Render the configuration module for the scanned files.
    #[napi]
    pub fn generate(&self) -> Result<String> {
        let loaded = self.project.load_units();
        let artifact = self.project.generate(&loaded.units);
        to_json(&GeneratedModule {
            output_path: &artifact.output_path,
            code: artifact.render(),
            diagnostics: &artifact.diagnostics,
        })
    }
}
