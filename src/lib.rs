//! # state-cursors
//!
//! Generates key-addressable cursor declarations for TypeScript application
//! state records.
//!
//! For every source file that declares the application state, a companion
//! `<name>.cursors.ts` is emitted with one `ICursor` constant per field,
//! addressed by a stable dotted key. Record-typed fields are flattened into
//! the same file; component states imported from other files are flattened
//! too, while route states get their own file rooted at the key that
//! reached them.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! generate  → Driver, traversal engine, renderer, writers
//!   ↓
//! naming    → Key composition, import aliases, accessor identifiers
//!   ↓
//! schema    → State records, enums, imports; schema extractors
//!   ↓
//! project   → Discovery, parallel loading, path lookup
//!   ↓
//! parser    → Logos lexer, recursive-descent declaration parser
//!   ↓
//! base      → Constants, lexical path helpers
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → project → schema → naming → generate)
// ============================================================================

/// Foundation: constants and path helpers
pub mod base;

/// Parser: Logos lexer, declaration parser
pub mod parser;

/// Project loading: discovery, parallel parse, lookup by path
pub mod project;

/// Schema model and extraction
pub mod schema;

/// Key and identifier naming
pub mod naming;

/// Generation driver and traversal engine
pub mod generate;

// Re-export the main entry points
pub use generate::{
    CursorsGenerator, FsWriter, GenerationError, GenerationProject, GenerationReport,
    GeneratorOptions, MemoryWriter, OutputWriter,
};
pub use project::{LoadedProject, SourceFile, WorkspaceLoader};
pub use schema::{DeclarationExtractor, SchemaExtractor, SourceSchema};
