//! Token kinds of the declaration lexer.

/// All token kinds produced by the lexer.
///
/// Keywords are not separate kinds: TypeScript keywords such as `interface`
/// or `enum` are contextual in the positions this parser cares about, so the
/// parser matches them by text on `IDENT` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,    // identifier or keyword
    NUMBER,   // 42, 3.14
    STRING,   // "hello" or 'hello'
    TEMPLATE, // `hello ${x}`

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_PAREN,     // (
    R_PAREN,     // )
    SEMICOLON,   // ;
    COLON,       // :
    COMMA,       // ,
    DOT,         // .
    QUESTION,    // ?
    EQ,          // =
    LT,          // <
    GT,          // >
    STAR,        // *
    PIPE,        // |
    AMP,         // &
    FAT_ARROW,   // =>
    DOT_DOT_DOT, // ...
    OTHER_PUNCT, // any other operator character

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
    EOF,
}

impl SyntaxKind {
    /// Check if this is trivia (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }
}
