use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::SourceFile;
use crate::base::normalize_path;

/// All source files of a project, keyed by normalized path.
///
/// Iteration follows insertion order, which the loaders keep sorted by path
/// so that generation order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct LoadedProject {
    files: IndexMap<PathBuf, SourceFile>,
}

impl LoadedProject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a project from in-memory sources.
    pub fn from_sources<P, T>(sources: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: Into<PathBuf>,
        T: AsRef<str>,
    {
        let mut project = Self::new();
        for (path, text) in sources {
            project.insert(SourceFile::parse(path, text));
        }
        project
    }

    /// Add a file, replacing any file already loaded at the same path.
    pub fn insert(&mut self, file: SourceFile) {
        self.files.insert(file.path().to_path_buf(), file);
    }

    pub fn get(&self, path: &Path) -> Option<&SourceFile> {
        self.files
            .get(path)
            .or_else(|| self.files.get(&normalize_path(path)))
    }

    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
