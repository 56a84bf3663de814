//! Recursive descent parser for TypeScript state declarations
//!
//! Walks the non-trivia token stream once. Top-level imports, interfaces and
//! enums become [`Item`]s; any other bracketed construct is skipped whole, so
//! nothing nested inside a class, function or namespace body is reported.

use std::fmt;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::ast::{EnumDecl, ImportDecl, InterfaceDecl, Item, ParsedModule, PropertySignature};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

/// Parse TypeScript source into the declarations relevant for state schemas
pub fn parse(input: &str) -> ParsedModule {
    let tokens: Vec<_> = Lexer::new(input).filter(|t| !t.kind.is_trivia()).collect();
    let mut parser = Parser::new(input, &tokens);
    parser.parse_module();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token<'a>],
    pos: usize,
    items: Vec<Item>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: &'a [Token<'a>]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            items: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> ParsedModule {
        ParsedModule {
            items: self.items,
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    fn current_text(&self) -> &'a str {
        self.tokens.get(self.pos).map(|t| t.text).unwrap_or("")
    }

    fn current_range(&self) -> TextRange {
        match self.current() {
            Some(token) => token.range(),
            None => TextRange::empty(TextSize::of(self.source)),
        }
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_ident(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.current_text() == text
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth_kind(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> TextSize {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.range().end(),
            None => TextSize::new(0),
        }
    }

    /// Whether a line break separates the current token from the previous one.
    fn starts_line(&self) -> bool {
        let Some(current) = self.current() else {
            return false;
        };
        let start = usize::from(self.prev_end());
        let end = usize::from(current.offset);
        self.source
            .get(start..end)
            .is_some_and(|gap| gap.contains('\n'))
    }

    fn bump(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range));
    }

    // =========================================================================
    // Skipping
    // =========================================================================

    /// Skip a `{..}`, `(..)` or `[..]` group starting at the current token.
    fn skip_balanced(&mut self) {
        let open = self.current_range();
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_BRACE | SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            self.bump();
            if depth == 0 {
                return;
            }
        }
        self.errors
            .push(SyntaxError::new("unclosed delimiter", open));
    }

    /// Skip a `<..>` type parameter or argument list.
    fn skip_angles(&mut self) {
        let open = self.current_range();
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT => depth = depth.saturating_sub(1),
                SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => {
                    self.skip_balanced();
                    continue;
                }
                _ => {}
            }
            self.bump();
            if depth == 0 {
                return;
            }
        }
        self.errors
            .push(SyntaxError::new("unclosed type argument list", open));
    }

    /// Skip to the end of a statement: a `;`, or the module specifier string
    /// that ends an import/export clause.
    fn skip_statement(&mut self) {
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::SEMICOLON => {
                    self.bump();
                    return;
                }
                SyntaxKind::STRING => {
                    self.bump();
                    if self.at(SyntaxKind::SEMICOLON) {
                        self.bump();
                    }
                    return;
                }
                SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => {
                    self.skip_balanced()
                }
                _ => self.bump(),
            }
        }
    }

    // =========================================================================
    // Items
    // =========================================================================

    fn parse_module(&mut self) {
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::IDENT => match self.current_text() {
                    "import"
                        if !matches!(self.nth_kind(1), SyntaxKind::L_PAREN | SyntaxKind::DOT) =>
                    {
                        self.parse_import()
                    }
                    "interface" if self.nth_kind(1) == SyntaxKind::IDENT => self.parse_interface(),
                    "enum" if self.nth_kind(1) == SyntaxKind::IDENT => self.parse_enum(),
                    _ => self.bump(),
                },
                SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => {
                    self.skip_balanced()
                }
                _ => self.bump(),
            }
        }
    }

    fn parse_import(&mut self) {
        let start = self.current_range().start();
        self.bump(); // import

        if !self.at(SyntaxKind::STAR) {
            // Named, default and side-effect imports carry no namespace alias.
            self.skip_statement();
            return;
        }
        self.bump();

        if !self.at_ident("as") {
            self.error("expected `as` after `import *`");
            self.skip_statement();
            return;
        }
        self.bump();

        if !self.at(SyntaxKind::IDENT) {
            self.error("expected namespace alias");
            self.skip_statement();
            return;
        }
        let alias = SmolStr::new(self.current_text());
        self.bump();

        if !self.at_ident("from") {
            self.error("expected `from`");
            self.skip_statement();
            return;
        }
        self.bump();

        if !self.at(SyntaxKind::STRING) {
            self.error("expected module specifier");
            self.skip_statement();
            return;
        }
        let specifier = unquote(self.current_text()).to_string();
        self.bump();
        if self.at(SyntaxKind::SEMICOLON) {
            self.bump();
        }

        self.items.push(Item::Import(ImportDecl {
            alias,
            specifier,
            range: TextRange::new(start, self.prev_end()),
        }));
    }

    fn parse_interface(&mut self) {
        let start = self.current_range().start();
        self.bump(); // interface

        let name = SmolStr::new(self.current_text());
        self.bump();

        if self.at(SyntaxKind::LT) {
            self.skip_angles();
        }

        let mut extends = Vec::new();
        if self.at_ident("extends") {
            self.bump();
            loop {
                match self.parse_type_reference() {
                    Some(reference) => extends.push(reference),
                    None => {
                        self.error("expected type after `extends`");
                        break;
                    }
                }
                if !self.at(SyntaxKind::COMMA) {
                    break;
                }
                self.bump();
            }
        }

        if !self.at(SyntaxKind::L_BRACE) {
            self.error(format!("expected `{{` to open body of `{name}`"));
            return;
        }
        let open = self.current_range();
        self.bump();

        let mut members = Vec::new();
        loop {
            match self.current_kind() {
                SyntaxKind::R_BRACE => {
                    self.bump();
                    break;
                }
                SyntaxKind::EOF => {
                    self.errors.push(SyntaxError::new(
                        format!("unclosed body of `{name}`"),
                        open,
                    ));
                    break;
                }
                SyntaxKind::SEMICOLON | SyntaxKind::COMMA => self.bump(),
                _ => {
                    if let Some(member) = self.parse_member() {
                        members.push(member);
                    }
                }
            }
        }

        self.items.push(Item::Interface(InterfaceDecl {
            name,
            extends,
            members,
            range: TextRange::new(start, self.prev_end()),
        }));
    }

    /// `a.b.C<T>` → `a.b.C`
    fn parse_type_reference(&mut self) -> Option<SmolStr> {
        if !self.at(SyntaxKind::IDENT) {
            return None;
        }
        let mut name = String::from(self.current_text());
        self.bump();
        while self.at(SyntaxKind::DOT) && self.nth_kind(1) == SyntaxKind::IDENT {
            self.bump();
            name.push('.');
            name.push_str(self.current_text());
            self.bump();
        }
        if self.at(SyntaxKind::LT) {
            self.skip_angles();
        }
        Some(SmolStr::new(name))
    }

    fn parse_member(&mut self) -> Option<PropertySignature> {
        if self.at_ident("readonly")
            && matches!(
                self.nth_kind(1),
                SyntaxKind::IDENT | SyntaxKind::STRING | SyntaxKind::L_BRACKET
            )
        {
            self.bump();
        }

        match self.current_kind() {
            SyntaxKind::L_BRACKET => {
                // Index signature or computed key.
                self.skip_balanced();
                if self.at(SyntaxKind::QUESTION) {
                    self.bump();
                }
                self.skip_signature();
                None
            }
            SyntaxKind::L_PAREN | SyntaxKind::LT => {
                // Call signature.
                self.skip_signature();
                None
            }
            SyntaxKind::IDENT | SyntaxKind::STRING | SyntaxKind::NUMBER => {
                let name = SmolStr::new(unquote(self.current_text()));
                self.bump();
                let optional = self.at(SyntaxKind::QUESTION);
                if optional {
                    self.bump();
                }
                match self.current_kind() {
                    SyntaxKind::COLON => {
                        self.bump();
                        let ty = self.type_text()?;
                        Some(PropertySignature { name, ty, optional })
                    }
                    SyntaxKind::L_PAREN | SyntaxKind::LT => {
                        // Method signature.
                        self.skip_signature();
                        None
                    }
                    SyntaxKind::SEMICOLON | SyntaxKind::COMMA | SyntaxKind::R_BRACE => {
                        Some(PropertySignature {
                            name,
                            ty: "any".to_string(),
                            optional,
                        })
                    }
                    _ => {
                        self.error(format!("expected `:` after member `{name}`"));
                        None
                    }
                }
            }
            _ => {
                self.error(format!(
                    "unexpected `{}` in interface body",
                    self.current_text()
                ));
                self.bump();
                None
            }
        }
    }

    /// Skip `<T>(params): Ret` in whichever parts are present.
    fn skip_signature(&mut self) {
        if self.at(SyntaxKind::LT) {
            self.skip_angles();
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.skip_balanced();
        }
        if self.at(SyntaxKind::COLON) {
            self.bump();
            let _ = self.type_text();
        }
    }

    /// Consume a type annotation and return its text.
    ///
    /// The type ends at depth zero on `;`, `,`, a closing bracket, or a line
    /// break that does not continue the type (`|`, `&`, `=>`, `.`).
    fn type_text(&mut self) -> Option<String> {
        let start = self.pos;
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            if depth == 0 {
                if matches!(
                    kind,
                    SyntaxKind::SEMICOLON
                        | SyntaxKind::COMMA
                        | SyntaxKind::R_BRACE
                        | SyntaxKind::R_PAREN
                        | SyntaxKind::R_BRACKET
                ) {
                    break;
                }
                if self.pos > start && self.starts_line() && !self.continues_type() {
                    break;
                }
            }
            match kind {
                SyntaxKind::L_BRACE
                | SyntaxKind::L_PAREN
                | SyntaxKind::L_BRACKET
                | SyntaxKind::LT => depth += 1,
                SyntaxKind::R_BRACE
                | SyntaxKind::R_PAREN
                | SyntaxKind::R_BRACKET
                | SyntaxKind::GT => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.bump();
        }

        if self.pos == start {
            self.error("expected type");
            return None;
        }

        let mut text = String::new();
        let mut last_end: Option<TextSize> = None;
        for token in &self.tokens[start..self.pos] {
            if last_end.is_some_and(|end| end < token.offset) {
                text.push(' ');
            }
            text.push_str(token.text);
            last_end = Some(token.range().end());
        }
        Some(text)
    }

    fn continues_type(&self) -> bool {
        let prev = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF);
        matches!(
            prev,
            SyntaxKind::PIPE
                | SyntaxKind::AMP
                | SyntaxKind::FAT_ARROW
                | SyntaxKind::COLON
                | SyntaxKind::DOT
                | SyntaxKind::LT
                | SyntaxKind::EQ
        ) || matches!(
            self.current_kind(),
            SyntaxKind::PIPE | SyntaxKind::AMP | SyntaxKind::FAT_ARROW | SyntaxKind::DOT
        )
    }

    fn parse_enum(&mut self) {
        self.bump(); // enum

        let name = SmolStr::new(self.current_text());
        self.bump();

        if !self.at(SyntaxKind::L_BRACE) {
            self.error(format!("expected `{{` to open body of enum `{name}`"));
            return;
        }
        let open = self.current_range();
        self.bump();

        let mut members = Vec::new();
        let mut expecting_member = true;
        loop {
            match self.current_kind() {
                SyntaxKind::R_BRACE => {
                    self.bump();
                    break;
                }
                SyntaxKind::EOF => {
                    self.errors.push(SyntaxError::new(
                        format!("unclosed body of enum `{name}`"),
                        open,
                    ));
                    break;
                }
                SyntaxKind::COMMA => {
                    self.bump();
                    expecting_member = true;
                }
                SyntaxKind::IDENT | SyntaxKind::STRING if expecting_member => {
                    members.push(SmolStr::new(unquote(self.current_text())));
                    self.bump();
                    expecting_member = false;
                }
                SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => {
                    self.skip_balanced()
                }
                _ => self.bump(),
            }
        }

        self.items.push(Item::Enum(EnumDecl { name, members }));
    }
}

fn unquote(text: &str) -> &str {
    let quoted = text.len() >= 2
        && ["'", "\"", "`"]
            .iter()
            .any(|q| text.starts_with(q) && text.ends_with(q));
    if quoted { &text[1..text.len() - 1] } else { text }
}
