//! Token kind definitions for the SQL tokenizer.
//!
//! Each `TokenKind` variant represents one lexical class discovered during
//! the scan. Nothing is dropped: whitespace and comments are kinds of their
//! own so that concatenating token values reproduces the input exactly.
//!
//! See `keyword.rs` for the `Keyword` enum and `tokenizer.rs` for tokenization.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TokenKind {
    /// Recognized SQL keyword.
    #[display("keyword({_0})")]
    Keyword(Keyword),
    /// Table / alias / column / function name, bare or backtick-quoted.
    #[display("identifier")]
    Ident,
    /// Single- or double-quoted literal, quotes included.
    #[display("string")]
    Str,
    /// Integer, decimal or exponent literal.
    #[display("number")]
    Number,
    /// Run of operator characters such as `=`, `<>`, `||`, `::` or `*`.
    #[display("operator")]
    Operator,
    /// Comma `,`.
    #[display("comma")]
    Comma,
    /// Dot `.` (used for qualified names like `schema.table`).
    #[display("dot")]
    Dot,
    /// Opening parenthesis `(`.
    #[display("paren_open")]
    ParenOpen,
    /// Closing parenthesis `)`.
    #[display("paren_close")]
    ParenClose,
    /// Statement separator `;`.
    #[display("semicolon")]
    Semicolon,
    /// `-- ...` up to (not including) the line break.
    #[display("line_comment")]
    LineComment,
    /// `/* ... */`, possibly spanning lines.
    #[display("block_comment")]
    BlockComment,
    /// Run of whitespace, line breaks included.
    #[display("whitespace")]
    Whitespace,
    /// Opaque templating span: `{{ }}`, `${ }`, `{# #}` or `{% %}`.
    #[display("template")]
    Template,
    /// Any single character no other scanner accepts.
    #[display("unknown")]
    Unknown,
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// Returns the keyword if this token is one.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    /// Convenience: returns true if this token represents any identifier.
    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident)
    }

    /// Returns true for comments of either style.
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Whitespace and comments carry no SQL meaning for the parser.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace) || self.is_comment()
    }
}
