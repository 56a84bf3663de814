//! # Project
//!
//! Discovers and loads the source files of a state project. Loading is the
//! only parallel step of a generation run: every file is read and parsed up
//! front, after which all lookups are in memory.

mod error;
pub mod file_loader;
mod loaded;
mod source_file;
pub mod workspace_loader;

pub use error::LoadError;
pub use loaded::LoadedProject;
pub use source_file::SourceFile;
pub use workspace_loader::WorkspaceLoader;
