//! Lexical path manipulation.
//!
//! Paths are never canonicalized against the file system: two spellings of
//! the same file compare equal once `.` and `..` components are folded away.

use std::path::{Component, Path, PathBuf};

use super::constants::{CURSORS_SUFFIX, SOURCE_EXT};

/// Fold `.` and `..` components without touching the file system.
///
/// A `..` that would climb above the start of a relative path is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

/// Resolve an import specifier (`./nested/state`) relative to the file that
/// declares it. The source extension is appended.
pub fn resolve_import_path(importing_file: &Path, relative_path: &str) -> PathBuf {
    let dir = importing_file.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&dir.join(format!("{relative_path}.{SOURCE_EXT}")))
}

/// Path of the generated cursors file for a state file:
/// same directory, same stem, `.cursors.ts` extension.
pub fn cursors_file_path(state_file: &Path) -> PathBuf {
    let stem = state_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    state_file.with_file_name(format!("{stem}.{CURSORS_SUFFIX}.{SOURCE_EXT}"))
}
