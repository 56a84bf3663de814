use std::path::Path;

use rayon::prelude::*;

use super::{LoadError, LoadedProject, file_loader};

/// Loads every state source file of a project directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse all files under `dir` in parallel.
    ///
    /// Any read failure aborts the load. Files with syntax errors are still
    /// loaded; the errors are logged and extraction works on whatever the
    /// parser recovered.
    pub fn load_directory(&self, dir: &Path) -> Result<LoadedProject, LoadError> {
        if !dir.is_dir() {
            return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
        }

        let paths = file_loader::collect_file_paths(dir)?;

        // Parse files in parallel
        let files = paths
            .par_iter()
            .map(|path| file_loader::load_and_parse(path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut project = LoadedProject::new();
        for file in files {
            for error in &file.module().errors {
                tracing::warn!("{}: {}", file.path().display(), error);
            }
            project.insert(file);
        }

        tracing::debug!(
            "Loaded {} source file(s) from {}",
            project.len(),
            dir.display()
        );
        Ok(project)
    }
}
