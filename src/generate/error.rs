use std::io;
use std::path::PathBuf;

use smol_str::SmolStr;
use thiserror::Error;

use crate::project::LoadError;

/// Errors that end a generation target.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Two states share a name in one file, so a field type is ambiguous.
    #[error(
        "Two states named `{name}` in {}; state names must be unique within a file",
        path.display()
    )]
    DuplicateState { path: PathBuf, name: SmolStr },

    /// The project could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// A generated file the writer failed to persist.
#[derive(Debug, Error)]
#[error("Failed to write {}: {source}", path.display())]
pub struct WriteFailure {
    pub path: PathBuf,
    pub source: io::Error,
}

/// A generation target that failed; other targets were still processed.
#[derive(Debug)]
pub struct RootFailure {
    /// The originating state file.
    pub path: PathBuf,
    pub error: GenerationError,
}
