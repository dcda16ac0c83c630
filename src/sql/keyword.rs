//! SQL keyword model used by the tokenizer and the structural parser.
//!
//! Only words that shape statement structure are classified as keywords:
//! statement heads, clause heads, join modifiers, set operators and the few
//! connectives the parser needs to tell clauses apart. Everything else,
//! including function names such as `EXTRACT` or `CAST`, stays an identifier
//! so that a call like `extract(year FROM d)` is recognised by shape alone.
//!
//! Words that matter only to one analysis (`FIRST`, `ROWS`, `TOP`, ...) are
//! matched by value with [`Token::is_word`](crate::Token::is_word) instead of
//! being promoted to keywords, so they remain usable as column names.
//!
//! Keywords are matched case-insensitively via `from_lower`, which expects a
//! pre-lowercased slice.

macro_rules! keywords {
    ($($variant:ident => $text:literal),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Keyword {
            $($variant),+
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant),+];

            /// Attempt to classify a *lower-cased* word slice into a `Keyword`.
            /// Returns `None` if the word is not a recognized keyword.
            pub fn from_lower(word: &str) -> Option<Self> {
                match word {
                    $($text => Some(Keyword::$variant),)+
                    _ => None,
                }
            }

            /// Canonical lowercase string form of the keyword.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text),+
                }
            }
        }
    };
}

keywords! {
    Select => "select",
    From => "from",
    Join => "join",
    On => "on",
    Using => "using",
    As => "as",
    Where => "where",
    Group => "group",
    Order => "order",
    By => "by",
    Having => "having",
    Window => "window",
    Qualify => "qualify",
    Limit => "limit",
    Offset => "offset",
    Fetch => "fetch",
    Union => "union",
    Except => "except",
    Intersect => "intersect",
    Minus => "minus",
    All => "all",
    Distinct => "distinct",
    With => "with",
    Recursive => "recursive",
    Materialized => "materialized",
    Insert => "insert",
    Into => "into",
    Update => "update",
    Set => "set",
    Delete => "delete",
    Create => "create",
    Drop => "drop",
    Truncate => "truncate",
    Table => "table",
    Values => "values",
    Inner => "inner",
    Left => "left",
    Right => "right",
    Full => "full",
    Outer => "outer",
    Cross => "cross",
    Natural => "natural",
    Lateral => "lateral",
    And => "and",
    Or => "or",
    Not => "not",
    In => "in",
    Is => "is",
    Null => "null",
    Exists => "exists",
    Case => "case",
    When => "when",
    Then => "then",
    Else => "else",
    End => "end",
    Between => "between",
    Like => "like",
    Explain => "explain",
}

impl Keyword {
    /// Keywords that may precede `JOIN` and belong to the same join clause.
    pub const JOIN_MODIFIERS: [Self; 7] = [
        Keyword::Inner,
        Keyword::Left,
        Keyword::Right,
        Keyword::Full,
        Keyword::Outer,
        Keyword::Cross,
        Keyword::Natural,
    ];

    /// Keywords combining two query expressions at the same level.
    pub const SET_OPERATORS: [Self; 4] = [
        Keyword::Union,
        Keyword::Except,
        Keyword::Intersect,
        Keyword::Minus,
    ];

    /// Keywords that double as scalar function names, e.g. `left(name, 3)`.
    pub fn is_function_name(self) -> bool {
        matches!(self, Keyword::Left | Keyword::Right)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_keywords() {
        for w in [
            "select", "from", "join", "on", "as", "where", "group", "order", "limit", "offset",
            "fetch", "union", "except", "intersect", "with", "recursive", "truncate",
        ] {
            assert!(Keyword::from_lower(w).is_some(), "{w} should be recognized");
        }
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["foo", "extract", "cast", "first", "rows", "only", "top", "year"] {
            assert!(
                Keyword::from_lower(w).is_none(),
                "{w} should NOT be recognized"
            );
        }
    }

    #[test]
    fn display_matches_as_str() {
        for kw in Keyword::ALL {
            assert_eq!(kw.to_string(), kw.as_str());
        }
    }

    #[test]
    fn from_lower_expects_lowercase_input() {
        assert_eq!(Keyword::from_lower("SELECT"), None);
    }
}
