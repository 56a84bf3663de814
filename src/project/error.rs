use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort loading a project.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The project root does not exist or is not a directory.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Directory traversal failed.
    #[error("Failed to scan {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}
