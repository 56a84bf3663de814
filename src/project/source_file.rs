use std::path::{Path, PathBuf};

use crate::base::normalize_path;
use crate::parser::{self, ParsedModule};

/// A loaded and parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    module: ParsedModule,
}

impl SourceFile {
    /// Parse `text` as the contents of `path`. The path is normalized.
    pub fn parse(path: impl Into<PathBuf>, text: impl AsRef<str>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            module: parser::parse(text.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn module(&self) -> &ParsedModule {
        &self.module
    }

    /// File name without extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        !self.module.ok()
    }
}
