//! Foundation types for the cursor generator.
//!
//! This module provides:
//! - Domain constants (file extensions, default aliases, capability names)
//! - Lexical path helpers shared by the loader and the traversal engine
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod paths;

pub use paths::{cursors_file_path, normalize_path, resolve_import_path};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
