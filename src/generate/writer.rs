//! Output writers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::Mutex;

/// Persists generated files.
pub trait OutputWriter {
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

impl<F> OutputWriter for F
where
    F: Fn(&Path, &[u8]) -> io::Result<()>,
{
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self(path, contents)
    }
}

/// Writes generated files to disk, creating parent directories as needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl OutputWriter for FsWriter {
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }
}

/// Collects generated files in memory, in write order.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    files: Mutex<IndexMap<PathBuf, Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents written to `path`, if any.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Paths written so far, in write order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

impl OutputWriter for MemoryWriter {
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.files.lock().insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}
