//! Declaration parser for TypeScript state modules
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → ParsedModule (imports, interfaces, enums)
//!     ↓
//! Schema extractor → SourceSchema
//! ```
//!
//! The parser is deliberately shallow. It understands namespace imports,
//! interface declarations and enum declarations; every other construct is
//! skipped by bracket depth so arbitrary code around the state declarations
//! does not disturb extraction.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{SyntaxError, parse};
pub use syntax_kind::SyntaxKind;
