use crate::*;

/// Keyword (or keyword pair) that opens a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ClauseKeyword {
    /// Tokens before the first recognized clause head.
    #[display("<leading>")]
    Leading,
    #[display("WITH")]
    With,
    #[display("SELECT")]
    Select,
    #[display("FROM")]
    From,
    #[display("JOIN")]
    Join,
    #[display("ON")]
    On,
    #[display("USING")]
    Using,
    #[display("WHERE")]
    Where,
    #[display("GROUP BY")]
    GroupBy,
    #[display("HAVING")]
    Having,
    #[display("WINDOW")]
    Window,
    #[display("QUALIFY")]
    Qualify,
    #[display("ORDER BY")]
    OrderBy,
    #[display("LIMIT")]
    Limit,
    #[display("OFFSET")]
    Offset,
    #[display("FETCH")]
    Fetch,
    #[display("{_0}")]
    SetOperation(Keyword),
    #[display("INSERT")]
    Insert,
    #[display("VALUES")]
    Values,
    #[display("UPDATE")]
    Update,
    #[display("SET")]
    Set,
    #[display("DELETE")]
    Delete,
    #[display("CREATE")]
    Create,
    #[display("DROP")]
    Drop,
    #[display("TRUNCATE")]
    Truncate,
}

impl ClauseKeyword {
    /// Clauses whose body lists relations.
    pub fn introduces_relations(self) -> bool {
        matches!(self, ClauseKeyword::From | ClauseKeyword::Join)
    }
}

/// A keyword-introduced section of a statement.
///
/// `tokens` runs from the clause head up to (not including) the next clause
/// head at the same nesting level, so parenthesized groups stay inside the
/// clause that contains them. Groups that are statements of their own are
/// additionally parsed into `nested_statements`, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause<'t> {
    pub keyword: ClauseKeyword,
    pub tokens: &'t [Token],
    pub nested_statements: Vec<Statement<'t>>,
    head_len: usize,
}

impl<'t> Clause<'t> {
    pub(crate) fn new(
        keyword: ClauseKeyword,
        tokens: &'t [Token],
        head_len: usize,
        nested_statements: Vec<Statement<'t>>,
    ) -> Self {
        Self {
            keyword,
            tokens,
            nested_statements,
            head_len: head_len.min(tokens.len()),
        }
    }

    /// The heading words, e.g. `LEFT OUTER JOIN`. Empty for implicit clauses.
    pub fn head(&self) -> &'t [Token] {
        &self.tokens[..self.head_len]
    }

    /// Everything after the heading words.
    pub fn body(&self) -> &'t [Token] {
        &self.tokens[self.head_len..]
    }

    /// Body tokens that are neither whitespace nor comments.
    pub fn significant_body(&self) -> impl Iterator<Item = &'t Token> + 't {
        self.body().iter().filter(|t| !t.is_trivia())
    }
}
