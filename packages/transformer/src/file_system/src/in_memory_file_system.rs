use super::types::SourceProvider;
use super::util::{clean_path, is_source_file};
use crate::diagnostics::TransformError;
use crate::source::SourceUnit;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Virtual project held in memory (browser playground, build-tool overlays, tests).
#[derive(Default)]
pub struct InMemoryFileSystem {
    files: Mutex<BTreeMap<String, String>>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files<P, T>(files: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: AsRef<str>,
        T: Into<String>,
    {
        let fs = Self::new();
        for (path, text) in files {
            fs.add_file(path.as_ref(), text);
        }
        fs
    }

    pub fn add_file(&self, path: &str, text: impl Into<String>) {
        self.lock().insert(clean_path(path), text.into());
    }

    pub fn remove_file(&self, path: &str) -> Option<String> {
        self.lock().remove(&clean_path(path))
    }

    pub fn read(&self, path: &str) -> Option<String> {
        self.lock().get(&clean_path(path)).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map still holds consistent strings.
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SourceProvider for InMemoryFileSystem {
    fn source_units(&self) -> Vec<Result<SourceUnit, TransformError>> {
        self.lock()
            .iter()
            .filter(|(path, _)| is_source_file(path))
            .map(|(path, text)| Ok(SourceUnit::new(path.clone(), text.clone())))
            .collect()
    }

    fn write(&self, path: &str, text: &str) -> Result<(), TransformError> {
        self.add_file(path, text);
        Ok(())
    }
}
