use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};

/// Lenient SQL tokenizer producing a flat, gap-free stream of `Token`s.
///
/// Behavior:
/// - Emits every character of the input exactly once; whitespace and comments
///   are tokens too, so offsets and line numbers stay exact.
/// - Aggregates `[A-Za-z0-9_$]` runs (and backtick-quoted names) into
///   identifiers, preserving original case, and promotes known words to
///   keywords case-insensitively.
/// - Emits templating spans (`{{ }}`, `${ }`, `{# #}`, `{% %}`) as one opaque
///   token so nothing inside them is ever read as SQL.
/// - Closes unterminated strings, comments and templates at end of input.
/// - Anything unrecognized becomes a one-character `Unknown` token.
///
/// Guarantees:
/// - Never panics and never returns an error.
/// - Concatenating all `value`s reproduces the input.
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(sql: &str) -> Vec<Token> {
    Scanner::new(sql).run()
}

const OPERATOR_CHARS: &str = "+-*/%<>=!|&^~:?@";

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    out: Vec<Token>,
}

impl Scanner {
    fn new(sql: &str) -> Self {
        Self {
            chars: sql.chars().collect(),
            pos: 0,
            line: 0,
            out: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.peek(0) {
            let start = self.pos;
            let line = self.line;
            let kind = match c {
                c if c.is_whitespace() => self.whitespace(),
                '-' if self.peek(1) == Some('-') => self.line_comment(),
                '/' if self.peek(1) == Some('*') => self.block_comment(),
                '\'' | '"' => self.string(c),
                '`' => self.quoted_ident(),
                '{' if matches!(self.peek(1), Some('{' | '#' | '%')) => self.template(),
                '$' if self.peek(1) == Some('{') => self.template(),
                c if c.is_ascii_digit() => self.number(),
                c if c.is_alphabetic() || c == '_' => self.word(),
                c if OPERATOR_CHARS.contains(c) => self.operator(),
                _ => {
                    self.pos += 1;
                    match c {
                        ',' => TokenKind::Comma,
                        '.' => TokenKind::Dot,
                        '(' => TokenKind::ParenOpen,
                        ')' => TokenKind::ParenClose,
                        ';' => TokenKind::Semicolon,
                        _ => TokenKind::Unknown,
                    }
                }
            };
            let value: String = self.chars[start..self.pos].iter().collect();
            self.line += value.matches('\n').count();
            let kind = match kind {
                TokenKind::Ident => Keyword::from_lower(&value.to_lowercase())
                    .map(TokenKind::Keyword)
                    .unwrap_or(TokenKind::Ident),
                other => other,
            };
            self.out.push(Token::new(kind, value, line, start, self.pos));
        }
        self.out
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek(0).is_some_and(&pred) {
            self.pos += 1;
        }
    }

    fn whitespace(&mut self) -> TokenKind {
        self.advance_while(char::is_whitespace);
        TokenKind::Whitespace
    }

    fn line_comment(&mut self) -> TokenKind {
        self.advance_while(|c| c != '\n');
        TokenKind::LineComment
    }

    fn block_comment(&mut self) -> TokenKind {
        self.pos += 2;
        while self.peek(0).is_some() && !self.starts_with("*/") {
            self.pos += 1;
        }
        self.pos = (self.pos + 2).min(self.chars.len());
        TokenKind::BlockComment
    }

    /// Quoted literal; a doubled quote character is an escaped quote.
    fn string(&mut self, quote: char) -> TokenKind {
        self.pos += 1;
        while let Some(c) = self.peek(0) {
            self.pos += 1;
            if c == quote {
                if self.peek(0) == Some(quote) {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        TokenKind::Str
    }

    fn quoted_ident(&mut self) -> TokenKind {
        self.pos += 1;
        self.advance_while(|c| c != '`');
        self.pos = (self.pos + 1).min(self.chars.len());
        TokenKind::Ident
    }

    /// Balanced templating span. `{{`/`${` blocks count braces so nested
    /// literals like `{{ {'a': 1} }}` stay inside; `{#`/`{%` end at `#}`/`%}`.
    fn template(&mut self) -> TokenKind {
        let closer = match self.peek(1) {
            Some('#') => Some("#}"),
            Some('%') => Some("%}"),
            _ => None,
        };
        match closer {
            Some(closer) => {
                self.pos += 2;
                while self.peek(0).is_some() && !self.starts_with(closer) {
                    self.pos += 1;
                }
                self.pos = (self.pos + 2).min(self.chars.len());
            }
            None => {
                // `${` opens one brace, `{{` opens two.
                let mut depth = 0usize;
                if self.peek(0) == Some('$') {
                    self.pos += 1;
                }
                while let Some(c) = self.peek(0) {
                    self.pos += 1;
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth = depth.saturating_sub(1);
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
        TokenKind::Template
    }

    fn number(&mut self) -> TokenKind {
        self.advance_while(|c| c.is_ascii_digit());
        if self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            self.advance_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(0), Some('e' | 'E')) {
            let digits_at = match self.peek(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += digits_at;
                self.advance_while(|c| c.is_ascii_digit());
            }
        }
        TokenKind::Number
    }

    fn word(&mut self) -> TokenKind {
        self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
        TokenKind::Ident
    }

    /// Operator run, stopping before anything that opens a comment.
    fn operator(&mut self) -> TokenKind {
        self.pos += 1;
        while self
            .peek(0)
            .is_some_and(|c| OPERATOR_CHARS.contains(c))
            && !self.starts_with("--")
            && !self.starts_with("/*")
        {
            self.pos += 1;
        }
        TokenKind::Operator
    }
}
