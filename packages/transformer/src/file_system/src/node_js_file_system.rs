use super::types::SourceProvider;
use super::util::{is_source_file, normalize_separators};
use crate::diagnostics::TransformError;
use crate::options::TransformerOptions;
use crate::source::SourceUnit;
use glob::Pattern;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Disk-backed provider. Units are discovered with the `include` globs relative to
/// `root`, minus anything matching an `exclude` glob; unit paths are
/// root-relative with `/` separators.
pub struct NodeJsFileSystem {
    root: PathBuf,
    include: Vec<String>,
    exclude: Vec<Pattern>,
}

impl NodeJsFileSystem {
    pub fn new(root: impl Into<PathBuf>, include: Vec<String>, exclude: &[String]) -> Self {
        Self {
            root: root.into(),
            include,
            exclude: exclude.iter().filter_map(|p| Pattern::new(p).ok()).collect(),
        }
    }

    pub fn from_options(options: &TransformerOptions) -> Self {
        Self::new(
            PathBuf::from(&options.root_dir),
            options.include.clone(),
            &options.exclude,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        normalize_separators(relative.to_string_lossy().as_ref())
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(relative))
    }

    /// Root-relative paths of every discovered source file, sorted.
    pub fn discover(&self) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        for include in &self.include {
            let pattern = self.root.join(include);
            let Ok(paths) = glob::glob(pattern.to_string_lossy().as_ref()) else {
                continue;
            };
            for path in paths.flatten() {
                if !path.is_file() {
                    continue;
                }
                let relative = self.relative(&path);
                if is_source_file(&relative) && !self.is_excluded(&relative) {
                    found.insert(relative);
                }
            }
        }
        found
    }

    pub fn read(&self, relative: &str) -> Result<SourceUnit, TransformError> {
        let full = self.root.join(relative);
        fs::read_to_string(&full)
            .map(|text| SourceUnit::new(relative, text))
            .map_err(|source| TransformError::Read {
                path: relative.to_string(),
                source,
            })
    }
}

impl SourceProvider for NodeJsFileSystem {
    fn source_units(&self) -> Vec<Result<SourceUnit, TransformError>> {
        self.discover().iter().map(|p| self.read(p)).collect()
    }

    fn write(&self, path: &str, text: &str) -> Result<(), TransformError> {
        let full = self.root.join(path);
        let to_error = |source| TransformError::Write {
            path: path.to_string(),
            source,
        };
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
        fs::write(&full, text).map_err(to_error)
    }
}
