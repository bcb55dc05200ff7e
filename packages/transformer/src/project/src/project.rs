use super::report::{BuildReport, LoadedUnits};
use crate::catalog::{scan, InterfaceCatalog};
use crate::configuration::{collect_resolved_interfaces, collect_used_interfaces, generate, ConfigurationArtifact};
use crate::diagnostics::{Diagnostic, TransformError};
use crate::file_system::{clean_path, SourceProvider};
use crate::logging::{Logger, NullLogger};
use crate::options::TransformerOptions;
use crate::source::SourceUnit;
use crate::transform::{TransformationResult, Transformer};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// A set of units seen through one provider. The catalog is rebuilt by
/// [`Project::rescan`] and swapped in whole; transforms work on a snapshot.
pub struct Project {
    options: Arc<TransformerOptions>,
    provider: Arc<dyn SourceProvider>,
    logger: Arc<dyn Logger>,
    catalog: RwLock<Arc<InterfaceCatalog>>,
}

impl Project {
    pub fn new(options: TransformerOptions, provider: Arc<dyn SourceProvider>) -> Self {
        Self {
            options: Arc::new(options),
            provider,
            logger: Arc::new(NullLogger::new()),
            catalog: RwLock::new(Arc::new(InterfaceCatalog::new())),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn options(&self) -> &TransformerOptions {
        &self.options
    }

    /// The current catalog. Empty until the first scan.
    pub fn catalog(&self) -> Arc<InterfaceCatalog> {
        match self.catalog.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, catalog: InterfaceCatalog) -> Arc<InterfaceCatalog> {
        let catalog = Arc::new(catalog);
        match self.catalog.write() {
            Ok(mut guard) => *guard = catalog.clone(),
            Err(poisoned) => *poisoned.into_inner() = catalog.clone(),
        }
        catalog
    }

    /// Units sorted by path. The generated configuration module is never a unit.
    pub fn load_units(&self) -> LoadedUnits {
        let artifact_path = clean_path(&self.options.config_output);
        let mut loaded = LoadedUnits::default();
        for entry in self.provider.source_units() {
            match entry {
                Ok(unit) if clean_path(&unit.path) == artifact_path => {}
                Ok(unit) => loaded.units.push(unit),
                Err(err) => {
                    self.logger.warn(&err.to_string());
                    loaded.diagnostics.push(err.to_diagnostic());
                }
            }
        }
        loaded.units.sort_by(|a, b| a.path.cmp(&b.path));
        self.logger
            .debug(&format!("Loaded {} source file(s)", loaded.units.len()));
        loaded
    }

    /// Rebuild the catalog from `units` and publish it.
    pub fn scan_units(&self, units: &[SourceUnit]) -> Arc<InterfaceCatalog> {
        let start = Instant::now();
        let catalog = scan(units, &self.options);
        self.logger.diagnostics(catalog.diagnostics());
        self.logger.info(&format!(
            "Catalog: {} interface(s) from {} file(s) in {:?}",
            catalog.len(),
            units.len(),
            start.elapsed()
        ));
        self.publish(catalog)
    }

    /// Load every unit and rebuild the catalog from them.
    pub fn rescan(&self) -> (LoadedUnits, Arc<InterfaceCatalog>) {
        let loaded = self.load_units();
        let catalog = self.scan_units(&loaded.units);
        (loaded, catalog)
    }

    /// A transformer bound to the current catalog snapshot.
    pub fn transformer(&self) -> Transformer {
        Transformer::new(self.catalog(), self.options.clone())
    }

    pub fn transform_file(&self, text: &str, file_name: &str) -> TransformationResult {
        self.transformer().transform(text, file_name)
    }

    /// Transform `units` in parallel against one catalog snapshot. Results keep the
    /// order of `units`.
    pub fn transform_units(&self, units: &[SourceUnit]) -> Vec<TransformationResult> {
        let transformer = self.transformer();
        let start = Instant::now();
        let results: Vec<TransformationResult> = units
            .par_iter()
            .map(|unit| transformer.transform(&unit.text, &unit.path))
            .collect();

        for result in &results {
            for diagnostic in result.diagnostics() {
                self.logger.diagnostic(diagnostic);
            }
            if result.has_changes() {
                self.logger.debug(&format!(
                    "{}: {} component(s) transformed",
                    result.file_name, result.stats.transformed_components
                ));
            }
        }
        self.logger.info(&format!(
            "Transformed {} file(s) in {:?}",
            results.len(),
            start.elapsed()
        ));
        results
    }

    /// Write transformed text. With `out_dir` every file is mirrored below it;
    /// without one, only files that changed are rewritten in place.
    pub fn write_results(
        &self,
        results: &[TransformationResult],
        out_dir: Option<&str>,
    ) -> (Vec<String>, Vec<Diagnostic>) {
        let mut written = Vec::new();
        let mut diagnostics = Vec::new();
        for result in results {
            let target = match out_dir {
                Some(dir) => clean_path(&format!("{}/{}", dir, result.file_name)),
                None if result.has_changes() => result.file_name.clone(),
                None => continue,
            };
            match self.provider.write(&target, &result.transformed_code) {
                Ok(()) => written.push(target),
                Err(err) => {
                    self.logger.error(&err.to_string());
                    diagnostics.push(err.to_diagnostic());
                }
            }
        }
        (written, diagnostics)
    }

    /// Interfaces named by markers in `units`, plus those their existing runtime
    /// calls already resolve against the current catalog.
    pub fn used_interfaces(&self, units: &[SourceUnit]) -> BTreeSet<String> {
        let mut used = collect_used_interfaces(units, &self.options);
        used.extend(collect_resolved_interfaces(units, &self.catalog(), &self.options));
        used
    }

    /// Configuration for the interfaces `units` ask for, against the current catalog.
    pub fn generate(&self, units: &[SourceUnit]) -> ConfigurationArtifact {
        let used = self.used_interfaces(units);
        let artifact = generate(&self.catalog(), &used, &self.options);
        self.logger.diagnostics(&artifact.diagnostics);
        self.logger.info(&format!(
            "Configuration: {} token(s), {} factory(ies)",
            artifact.token_table.len(),
            artifact.factories.len()
        ));
        artifact
    }

    /// Write the rendered artifact to `output`, or to its configured path. Returns
    /// the path written.
    pub fn write_artifact(
        &self,
        artifact: &ConfigurationArtifact,
        output: Option<&str>,
    ) -> Result<String, TransformError> {
        let path = output.unwrap_or(&artifact.output_path).to_string();
        self.provider.write(&path, &artifact.render())?;
        self.logger.debug(&format!("Wrote {}", path));
        Ok(path)
    }

    /// Scan, transform, write and generate in one pass. Failures are collected in
    /// the report.
    pub fn build(&self) -> BuildReport {
        let (loaded, catalog) = self.rescan();
        let mut diagnostics = loaded.diagnostics;
        diagnostics.extend(catalog.diagnostics().iter().cloned());

        // Usage is read from the untransformed text; transformed output carries no
        // markers.
        let artifact = self.generate(&loaded.units);
        let files = self.transform_units(&loaded.units);

        let out_dir = self.options.out_dir.clone();
        let (mut written, write_diagnostics) = self.write_results(&files, out_dir.as_deref());
        diagnostics.extend(write_diagnostics);

        match self.write_artifact(&artifact, None) {
            Ok(path) => written.push(path),
            Err(err) => diagnostics.push(err.to_diagnostic()),
        }

        BuildReport {
            diagnostics,
            files,
            artifact,
            written,
        }
    }
}
