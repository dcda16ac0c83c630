use crate::*;

/// Logical kind of a statement, taken from its first keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StatementKind {
    #[display("SELECT")]
    Select,
    #[display("INSERT")]
    Insert,
    #[display("UPDATE")]
    Update,
    #[display("DELETE")]
    Delete,
    #[display("CREATE")]
    Create,
    #[display("DROP")]
    Drop,
    #[display("TRUNCATE")]
    Truncate,
    #[display("WITH")]
    With,
    #[display("UNKNOWN")]
    Unknown,
}

impl StatementKind {
    pub(crate) fn from_keyword(kw: Keyword) -> Self {
        match kw {
            Keyword::Select => StatementKind::Select,
            Keyword::Insert => StatementKind::Insert,
            Keyword::Update => StatementKind::Update,
            Keyword::Delete => StatementKind::Delete,
            Keyword::Create => StatementKind::Create,
            Keyword::Drop => StatementKind::Drop,
            Keyword::Truncate => StatementKind::Truncate,
            Keyword::With => StatementKind::With,
            _ => StatementKind::Unknown,
        }
    }
}

/// One statement of a script, or a parenthesized sub-statement.
///
/// `tokens` borrows the statement's slice of the token stream (without the
/// terminating `;`). Clauses partition the significant part of that slice in
/// source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'t> {
    pub kind: StatementKind,
    /// What a `WITH` statement does after its CTE definitions; equal to `kind`
    /// for every other statement.
    pub body_kind: StatementKind,
    pub tokens: &'t [Token],
    pub clauses: Vec<Clause<'t>>,
    /// Names introduced by `WITH name AS (...)`, in definition order.
    pub cte_names: Vec<String>,
    /// `WITH RECURSIVE`: each CTE body may refer to its own name.
    pub recursive: bool,
}

impl<'t> Statement<'t> {
    /// True for plain SELECTs and for `WITH ... SELECT`.
    pub fn is_select(&self) -> bool {
        self.body_kind == StatementKind::Select
    }

    /// Whether `name` is one of this statement's CTEs (case-insensitive).
    pub fn defines_cte(&self, name: &str) -> bool {
        self.cte_names.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// First clause opened by `keyword`.
    pub fn clause(&self, keyword: ClauseKeyword) -> Option<&Clause<'t>> {
        self.clauses.iter().find(|c| c.keyword == keyword)
    }

    /// Sub-statements directly below this one, across all clauses.
    pub fn nested_statements(&self) -> impl Iterator<Item = &Statement<'t>> {
        self.clauses.iter().flat_map(|c| c.nested_statements.iter())
    }

    /// Char span `(start, end)` of the statement in the original text.
    pub fn span(&self) -> Option<(usize, usize)> {
        let first = self.tokens.first()?;
        let last = self.tokens.last()?;
        Some((first.start, last.end))
    }

    /// Source text of the statement, exactly as written.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    /// Source text with comments removed and surrounding whitespace trimmed.
    ///
    /// A comment wedged between two tokens without whitespace is replaced by a
    /// single space so the tokens do not fuse.
    pub fn text_without_comments(&self) -> String {
        let mut out = String::new();
        let mut after_comment = false;
        for t in self.tokens {
            if t.kind.is_comment() {
                after_comment = true;
                continue;
            }
            if after_comment
                && t.kind != TokenKind::Whitespace
                && !out.is_empty()
                && !out.ends_with(char::is_whitespace)
            {
                out.push(' ');
            }
            after_comment = false;
            out.push_str(&t.value);
        }
        out.trim().to_string()
    }
}
