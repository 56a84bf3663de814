//! Declaration items recognised in a source file.
//!
//! Only the shapes the schema extractor needs are modelled; everything else
//! in a file is skipped by the parser.

use smol_str::SmolStr;
use text_size::TextRange;

use super::SyntaxError;

/// Result of parsing one file: recognised items in source order plus any
/// syntax errors met along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedModule {
    pub items: Vec<Item>,
    pub errors: Vec<SyntaxError>,
}

impl ParsedModule {
    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(import) => Some(import),
            _ => None,
        })
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Interface(interface) => Some(interface),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Enum(decl) => Some(decl),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Import(ImportDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
}

/// `import * as <alias> from '<specifier>';`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub alias: SmolStr,
    /// Module specifier without quotes.
    pub specifier: String,
    pub range: TextRange,
}

/// `interface <name> extends <extends..> { <members> }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: SmolStr,
    /// Heritage clauses as written, type arguments dropped (`bf.IState`).
    pub extends: Vec<SmolStr>,
    pub members: Vec<PropertySignature>,
    pub range: TextRange,
}

/// A property member `name?: Type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    pub name: SmolStr,
    /// Type annotation text with whitespace collapsed.
    pub ty: String,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: SmolStr,
    pub members: Vec<SmolStr>,
}
