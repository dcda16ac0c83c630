//! Lenient, position-preserving SQL tokenization.
//!
//! This module holds the leaf layer every other analysis builds on: a single
//! forward scan that turns raw query text into a flat token stream annotated
//! with 0-based line numbers and char offsets.
//!
//! Modules:
//! - `keyword`    : Keywords that shape statement structure.
//! - `token_kind` : Classification of lexical atoms.
//! - `token`      : Token struct pairing a `TokenKind` with its text and span.
//! - `tokenizer`  : Single pass O(n) tokenizer producing a `Vec<Token>` from raw SQL.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid SQL (robust for live editing).
//! 2. Preserve original casing for display & lookup.
//! 3. Keep every character, whitespace and comments included, so offsets
//!    computed from tokens always agree with the source text.
//! 4. Treat templating placeholders as opaque; never parse them as SQL.
//!
//! Example:
//! ```rust
//! use sqlscope::prelude::*;
//!
//! let tokens = tokenize("SELECT a, b FROM {{ source }}");
//! assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
//! assert!(tokens.iter().any(|t| t.kind == TokenKind::Template));
//! ```

pub mod keyword;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::Keyword;
pub use token::{Token, token_at};
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;

/// Convenience prelude re-exporting the most commonly used items.
///
/// Import with:
/// `use sqlscope::prelude::*;`
pub mod prelude {
    pub use super::{Keyword, Token, TokenKind, token_at, tokenize};
}
