//! # Generate
//!
//! Cursor generation driver.
//!
//! [`CursorsGenerator`] loads a project, finds the application state in every
//! originating file and renders a `.cursors.ts` companion for it. Each
//! originating file is an isolated target: a schema error in one is logged
//! and recorded in the [`GenerationReport`] while the others carry on.
//!
//! ```no_run
//! use cursors::generate::{CursorsGenerator, FsWriter, GenerationProject};
//! use cursors::schema::DeclarationExtractor;
//!
//! let project = GenerationProject::new("app/src", "IApplicationState");
//! let generator = CursorsGenerator::new(project, DeclarationExtractor, FsWriter);
//! let report = generator.run_recurse()?;
//! assert!(report.is_success());
//! # Ok::<(), cursors::generate::GenerationError>(())
//! ```

mod engine;
mod error;
pub mod render;
mod writer;

pub use engine::GeneratedFile;
pub use error::{GenerationError, RootFailure, WriteFailure};
pub use writer::{FsWriter, MemoryWriter, OutputWriter};

use std::path::PathBuf;

use engine::Traversal;

use crate::base::constants::{DEFAULT_LIBRARY_ALIAS, STATE_ALIAS_BASE};
use crate::base::normalize_path;
use crate::project::{LoadedProject, SourceFile, WorkspaceLoader};
use crate::schema::SchemaExtractor;

/// Generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Key of the root cursor. `None` uses the library's default root cursor.
    pub root_key: Option<String>,
    /// Preferred alias for importing the state module into generated files.
    pub state_alias_base: String,
    /// Library alias when the root state names none in its heritage list.
    pub default_library_alias: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            root_key: None,
            state_alias_base: STATE_ALIAS_BASE.to_string(),
            default_library_alias: DEFAULT_LIBRARY_ALIAS.to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn with_root_key(mut self, root_key: impl Into<String>) -> Self {
        self.root_key = Some(root_key.into());
        self
    }
}

/// What to generate from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationProject {
    /// Directory scanned for state source files.
    pub root_dir: PathBuf,
    /// Name of the root state record, e.g. `IApplicationState`.
    pub app_state_name: String,
    /// Originating files. Empty means every loaded file; relative paths are
    /// taken relative to `root_dir`.
    pub state_files: Vec<PathBuf>,
}

impl GenerationProject {
    pub fn new(root_dir: impl Into<PathBuf>, app_state_name: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            app_state_name: app_state_name.into(),
            state_files: Vec::new(),
        }
    }

    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_files.push(path.into());
        self
    }
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files handed to the writer successfully, in write order.
    pub written: Vec<PathBuf>,
    /// Targets that failed with a schema error.
    pub failures: Vec<RootFailure>,
    /// Files the writer could not persist.
    pub write_failures: Vec<WriteFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.write_failures.is_empty()
    }
}

/// Generates cursors files for a project.
pub struct CursorsGenerator<E, W> {
    project: GenerationProject,
    extractor: E,
    writer: W,
    options: GeneratorOptions,
}

impl<E: SchemaExtractor, W: OutputWriter> CursorsGenerator<E, W> {
    pub fn new(project: GenerationProject, extractor: E, writer: W) -> Self {
        Self {
            project,
            extractor,
            writer,
            options: GeneratorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Generate without following imports into other files.
    pub fn run(&self) -> Result<GenerationReport, GenerationError> {
        self.run_base(false)
    }

    /// Generate, expanding component states and route-rooted states reached
    /// through imports.
    pub fn run_recurse(&self) -> Result<GenerationReport, GenerationError> {
        self.run_base(true)
    }

    fn run_base(&self, recurse: bool) -> Result<GenerationReport, GenerationError> {
        let loaded = WorkspaceLoader::new().load_directory(&self.project.root_dir)?;
        Ok(self.generate(&loaded, recurse))
    }

    /// Generate from an already loaded project.
    pub fn generate(&self, loaded: &LoadedProject, recurse: bool) -> GenerationReport {
        let mut report = GenerationReport::default();

        for file in self.originating_files(loaded) {
            let schema = self.extractor.extract(file);
            let mut traversal = Traversal::new(loaded, &self.extractor, &self.options, recurse);
            let result = traversal.generate_file(
                file,
                &schema,
                &self.project.app_state_name,
                self.options.root_key.as_deref(),
            );

            match result {
                Ok(()) => {
                    for output in traversal.finish() {
                        self.write(output, &mut report);
                    }
                }
                Err(error) => {
                    tracing::error!(
                        "Error on cursors writing for {}: {}",
                        file.path().display(),
                        error
                    );
                    report.failures.push(RootFailure {
                        path: file.path().to_path_buf(),
                        error,
                    });
                }
            }
        }

        report
    }

    fn originating_files<'p>(&self, loaded: &'p LoadedProject) -> Vec<&'p SourceFile> {
        if self.project.state_files.is_empty() {
            return loaded.files().collect();
        }

        let mut files = Vec::new();
        for path in &self.project.state_files {
            let path = if path.is_relative() {
                self.project.root_dir.join(path)
            } else {
                path.clone()
            };
            match loaded.get(&normalize_path(&path)) {
                Some(file) => files.push(file),
                None => tracing::warn!("State file {} was not loaded", path.display()),
            }
        }
        files
    }

    fn write(&self, output: GeneratedFile, report: &mut GenerationReport) {
        match self.writer.write(&output.path, output.contents.as_bytes()) {
            Ok(()) => report.written.push(output.path),
            Err(source) => {
                let failure = WriteFailure {
                    path: output.path,
                    source,
                };
                tracing::error!("{}", failure);
                report.write_failures.push(failure);
            }
        }
    }
}

#[cfg(test)]
mod tests;
