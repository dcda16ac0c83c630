//! Token model tying a `TokenKind` to its source text and position.
//!
//! Offsets count `char`s, not bytes, and always refer to the *original* query
//! string supplied to the tokenizer. `line` is the 0-based line on which the
//! token starts. Tokens are immutable values; downstream code builds new
//! structures instead of editing them.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};

/// A lexical token with its inclusive start and exclusive end char offsets.
///
/// Invariants:
/// - `end >= start`
/// - `value` is exactly the source text in `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// Construct a new token.
    pub fn new(
        kind: TokenKind,
        value: impl Into<String>,
        line: usize,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
            start,
            end,
        }
    }

    /// Char length of this token (`end - start`).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True if the token's length is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if this token represents a given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        self.kind.keyword()
    }

    pub fn is_ident(&self) -> bool {
        self.kind.is_ident()
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Case-insensitive match of a bare word, keyword or identifier alike.
    ///
    /// Used for words that only one analysis cares about (`FIRST`, `ROWS`,
    /// `TOP`), which the tokenizer deliberately leaves unclassified.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self.kind, TokenKind::Ident | TokenKind::Keyword(_))
            && self.value.eq_ignore_ascii_case(word)
    }

    /// Identifier text with backtick quoting removed.
    pub fn name(&self) -> &str {
        self.value
            .strip_prefix('`')
            .map(|v| v.strip_suffix('`').unwrap_or(v))
            .unwrap_or(&self.value)
    }

    /// Returns true if the cursor (char offset) lies within this token's span.
    ///
    /// NOTE: End is exclusive, so `cursor == end` returns false.
    pub fn contains(&self, cursor: usize) -> bool {
        cursor >= self.start && cursor < self.end
    }

    /// Convenience: convert to a `(start, end)` tuple.
    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

/// Find the token covering `offset`, e.g. the word under the mouse for a hover
/// tooltip. Tokens are sorted and contiguous, so this is a binary search.
pub fn token_at(tokens: &[Token], offset: usize) -> Option<&Token> {
    let idx = tokens.partition_point(|t| t.end <= offset);
    tokens.get(idx).filter(|t| t.contains(offset))
}
