//! File discovery and reading.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{LoadError, SourceFile};
use crate::base::constants::{CURSORS_SUFFIX, SOURCE_EXT};

/// Recursively collect the state source files under `dir`, sorted by path.
///
/// Generated cursors files are skipped so that a rerun sees the same inputs.
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_state_source(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Whether a path names a state source file rather than a generated one.
pub fn is_state_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let generated = format!(".{CURSORS_SUFFIX}.{SOURCE_EXT}");
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXT) && !name.ends_with(&generated)
}

/// Read a file into a string.
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a file.
pub fn load_and_parse(path: &Path) -> Result<SourceFile, LoadError> {
    let text = load_file(path)?;
    Ok(SourceFile::parse(path, text))
}
