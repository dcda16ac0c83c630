use crate::*;

/// Sub-statements nested deeper than this stay opaque tokens of their clause.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Split a token stream into top-level statements and parse each one.
///
/// Statements are separated by `;` tokens at parenthesis depth 0; separators
/// inside strings, comments or templates never reach this level because the
/// tokenizer already folded them into single tokens. Statements consisting only
/// of whitespace and comments are dropped. Unbalanced parentheses are tolerated:
/// a stray `)` is ignored, an unclosed `(` extends to the end of input.
pub fn parse_statements(tokens: &[Token]) -> Vec<Statement<'_>> {
    let mut statements = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, t) in tokens.iter().enumerate() {
        match t.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => depth = depth.saturating_sub(1),
            TokenKind::Semicolon if depth == 0 => {
                push_statement(&mut statements, &tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_statement(&mut statements, &tokens[start..]);
    debug!(
        "Parsed {} statement(s) from {} token(s)",
        statements.len(),
        tokens.len()
    );
    statements
}

fn push_statement<'t>(statements: &mut Vec<Statement<'t>>, tokens: &'t [Token]) {
    if tokens.iter().any(|t| !t.is_trivia()) {
        statements.push(StatementParser::new(tokens, 0).parse(false));
    }
}

/// Index of the next non-trivia token at or after `from`.
pub(crate) fn next_significant(tokens: &[Token], from: usize) -> Option<usize> {
    (from..tokens.len()).find(|&i| !tokens[i].is_trivia())
}

/// Index of the `)` matching the `(` at `open`, or `tokens.len()` when the
/// group is never closed.
pub(crate) fn matching_close(tokens: &[Token], open: usize) -> usize {
    let mut depth = 0usize;
    for (i, t) in tokens.iter().enumerate().skip(open) {
        match t.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

/// Whether a group's contents begin a query, looking through extra leading
/// parentheses as in `((SELECT ...) UNION (SELECT ...))`.
fn starts_subquery(inner: &[Token]) -> bool {
    leading_query(inner, 0).1
}

/// Index of the first significant token at or after `from` that is not `(`,
/// and whether it opens a query.
fn leading_query(tokens: &[Token], from: usize) -> (usize, bool) {
    let mut at = from;
    while let Some(i) = next_significant(tokens, at) {
        match tokens[i].kind {
            TokenKind::ParenOpen => at = i + 1,
            TokenKind::Keyword(Keyword::Select | Keyword::With) => return (i, true),
            _ => return (i, false),
        }
    }
    (tokens.len(), false)
}

fn statement_kind(tokens: &[Token]) -> StatementKind {
    let mut at = 0;
    while let Some(i) = next_significant(tokens, at) {
        match tokens[i].kind {
            TokenKind::ParenOpen => at = i + 1,
            TokenKind::Keyword(kw) => return StatementKind::from_keyword(kw),
            _ => break,
        }
    }
    StatementKind::Unknown
}

struct PendingClause<'t> {
    keyword: ClauseKeyword,
    start: usize,
    head_len: usize,
    nested: Vec<Statement<'t>>,
}

struct StatementParser<'t> {
    tokens: &'t [Token],
    depth: usize,
    kind: StatementKind,
    first: Option<usize>,
}

impl<'t> StatementParser<'t> {
    fn new(tokens: &'t [Token], depth: usize) -> Self {
        Self {
            tokens,
            depth,
            kind: statement_kind(tokens),
            first: next_significant(tokens, 0),
        }
    }

    /// `relation` marks a group found where a table is expected; its leading
    /// tokens then form an implicit FROM clause, as in `FROM (a JOIN b ON ...)`.
    fn parse(self, relation: bool) -> Statement<'t> {
        let tokens = self.tokens;
        let implicit_from = relation
            && self
                .first
                .is_some_and(|i| !matches!(tokens[i].kind, TokenKind::Keyword(_)));
        let mut clauses = Vec::new();
        let mut current = PendingClause {
            keyword: if implicit_from {
                ClauseKeyword::From
            } else {
                ClauseKeyword::Leading
            },
            start: 0,
            head_len: 0,
            nested: Vec::new(),
        };
        let mut prev: Option<usize> = None;
        let mut i = 0;

        while i < tokens.len() {
            let tok = &tokens[i];
            if tok.is_trivia() {
                i += 1;
                continue;
            }
            if tok.kind == TokenKind::ParenOpen {
                let close = matching_close(tokens, i);
                let found = self.group(i, close, prev, current.keyword);
                current.nested.extend(found);
                prev = (close < tokens.len()).then_some(close);
                i = close + 1;
                continue;
            }
            if let Some((keyword, head_end)) = self.clause_head(i, prev) {
                let finished = std::mem::replace(
                    &mut current,
                    PendingClause {
                        keyword,
                        start: i,
                        head_len: head_end - i,
                        nested: Vec::new(),
                    },
                );
                Self::finish(&mut clauses, tokens, finished, i);
                prev = Some(head_end - 1);
                i = head_end;
                continue;
            }
            prev = Some(i);
            i += 1;
        }
        Self::finish(&mut clauses, tokens, current, tokens.len());

        let (cte_names, recursive) = clauses
            .iter()
            .find(|c: &&Clause<'t>| c.keyword == ClauseKeyword::With)
            .map(Self::cte_definitions)
            .unwrap_or_default();
        let body_kind = match self.kind {
            StatementKind::With => clauses
                .iter()
                .map(|c| c.keyword)
                .find(|k| !matches!(k, ClauseKeyword::With | ClauseKeyword::Leading))
                .map(Self::clause_statement_kind)
                .unwrap_or(StatementKind::Unknown),
            other => other,
        };

        Statement {
            kind: self.kind,
            body_kind,
            tokens,
            clauses,
            cte_names,
            recursive,
        }
    }

    fn finish(
        clauses: &mut Vec<Clause<'t>>,
        tokens: &'t [Token],
        pending: PendingClause<'t>,
        end: usize,
    ) {
        let slice = &tokens[pending.start..end];
        let is_noise = pending.keyword == ClauseKeyword::Leading
            && pending.nested.is_empty()
            && slice.iter().all(Token::is_trivia);
        if !is_noise {
            clauses.push(Clause::new(
                pending.keyword,
                slice,
                pending.head_len,
                pending.nested,
            ));
        }
    }

    fn clause_statement_kind(keyword: ClauseKeyword) -> StatementKind {
        match keyword {
            ClauseKeyword::Select => StatementKind::Select,
            ClauseKeyword::Insert => StatementKind::Insert,
            ClauseKeyword::Update => StatementKind::Update,
            ClauseKeyword::Delete => StatementKind::Delete,
            ClauseKeyword::Create => StatementKind::Create,
            ClauseKeyword::Drop => StatementKind::Drop,
            ClauseKeyword::Truncate => StatementKind::Truncate,
            _ => StatementKind::Unknown,
        }
    }

    /// Recognize a clause head at `i`, returning its keyword and the index just
    /// past the heading words.
    fn clause_head(&self, i: usize, prev: Option<usize>) -> Option<(ClauseKeyword, usize)> {
        let tokens = self.tokens;
        let kw = tokens[i].keyword()?;
        let next = next_significant(tokens, i + 1);
        let next_kw = next.and_then(|n| tokens[n].keyword());
        let prev_kw = prev.and_then(|p| tokens[p].keyword());
        // Statement heads count at the start, or after the CTEs of a WITH.
        let at_head = Some(i) == self.first || self.kind == StatementKind::With;

        let single = |keyword| Some((keyword, i + 1));
        match kw {
            Keyword::With if self.opens_ctes(i, next, prev_kw) => match (next, next_kw) {
                (Some(n), Some(Keyword::Recursive)) => Some((ClauseKeyword::With, n + 1)),
                _ => single(ClauseKeyword::With),
            },
            Keyword::Select => single(ClauseKeyword::Select),
            // `a IS DISTINCT FROM b` compares, it does not open a FROM clause.
            Keyword::From if prev_kw == Some(Keyword::Distinct) => None,
            Keyword::From => single(ClauseKeyword::From),
            Keyword::Join => single(ClauseKeyword::Join),
            k if Keyword::JOIN_MODIFIERS.contains(&k) => {
                let mut at = i;
                loop {
                    let n = next_significant(tokens, at + 1)?;
                    match tokens[n].keyword() {
                        Some(Keyword::Join) => return Some((ClauseKeyword::Join, n + 1)),
                        Some(m) if Keyword::JOIN_MODIFIERS.contains(&m) => at = n,
                        _ => return None,
                    }
                }
            }
            Keyword::On => single(ClauseKeyword::On),
            Keyword::Using => single(ClauseKeyword::Using),
            Keyword::Where => single(ClauseKeyword::Where),
            Keyword::Having => single(ClauseKeyword::Having),
            Keyword::Window => single(ClauseKeyword::Window),
            Keyword::Qualify => single(ClauseKeyword::Qualify),
            Keyword::Group | Keyword::Order => match (next, next_kw) {
                (Some(n), Some(Keyword::By)) if kw == Keyword::Group => {
                    Some((ClauseKeyword::GroupBy, n + 1))
                }
                (Some(n), Some(Keyword::By)) => Some((ClauseKeyword::OrderBy, n + 1)),
                _ => None,
            },
            Keyword::Limit => single(ClauseKeyword::Limit),
            Keyword::Offset => single(ClauseKeyword::Offset),
            Keyword::Fetch => single(ClauseKeyword::Fetch),
            // BigQuery's `SELECT * EXCEPT (col)` is a column filter, not a set operation.
            Keyword::Except
                if next.is_some_and(|n| {
                    tokens[n].kind == TokenKind::ParenOpen
                        && !starts_subquery(&tokens[n + 1..matching_close(tokens, n)])
                }) =>
            {
                None
            }
            k if Keyword::SET_OPERATORS.contains(&k) => match (next, next_kw) {
                (Some(n), Some(Keyword::All | Keyword::Distinct)) => {
                    Some((ClauseKeyword::SetOperation(k), n + 1))
                }
                _ => single(ClauseKeyword::SetOperation(k)),
            },
            Keyword::Values => single(ClauseKeyword::Values),
            Keyword::Insert if at_head => single(ClauseKeyword::Insert),
            Keyword::Update if at_head => single(ClauseKeyword::Update),
            Keyword::Delete if at_head => single(ClauseKeyword::Delete),
            Keyword::Create if at_head => single(ClauseKeyword::Create),
            Keyword::Drop if at_head => single(ClauseKeyword::Drop),
            Keyword::Truncate if at_head => single(ClauseKeyword::Truncate),
            Keyword::Set if self.updates() => single(ClauseKeyword::Set),
            _ => None,
        }
    }

    /// `WITH` opens CTE definitions at the start of a statement, and as the
    /// query of `INSERT INTO t WITH ...` or `CREATE ... AS WITH ...`. A `WITH (`
    /// there is a table option list, not CTEs.
    fn opens_ctes(&self, i: usize, next: Option<usize>, prev_kw: Option<Keyword>) -> bool {
        if Some(i) == self.first {
            return true;
        }
        let query_follows = next.is_some_and(|n| self.tokens[n].kind != TokenKind::ParenOpen);
        query_follows
            && match self.kind {
                StatementKind::Insert => true,
                StatementKind::Create => prev_kw == Some(Keyword::As),
                _ => false,
            }
    }

    fn updates(&self) -> bool {
        self.kind == StatementKind::Update
            || (self.kind == StatementKind::With
                && self
                    .tokens
                    .iter()
                    .any(|t| t.is_keyword(Keyword::Update)))
    }

    /// Parse the group `tokens[open..=close]` into the statements it holds.
    ///
    /// A group directly after a function name is an argument list: keywords in
    /// it are arguments (`EXTRACT(YEAR FROM d)`, `SUBSTRING(s FROM 2)`) and
    /// never start clauses; only complete subqueries inside it are parsed.
    fn group(
        &self,
        open: usize,
        close: usize,
        prev: Option<usize>,
        clause: ClauseKeyword,
    ) -> Vec<Statement<'t>> {
        let inner = &self.tokens[open + 1..close];
        if self.depth >= MAX_NESTING_DEPTH {
            trace!("Nesting limit reached at offset {}", self.tokens[open].start);
            return Vec::new();
        }
        let prev_tok = prev.map(|p| &self.tokens[p]);
        let is_call = prev_tok.is_some_and(|t| {
            t.is_ident() || t.keyword().is_some_and(Keyword::is_function_name)
        });
        if is_call {
            // `= ANY (SELECT ...)`, `ARRAY(SELECT ...)`: the whole argument is a query.
            let (first, is_query) = leading_query(inner, 0);
            if is_query && Some(first) == next_significant(inner, 0) {
                return vec![StatementParser::new(inner, self.depth + 1).parse(false)];
            }
            return self.subqueries_within(inner);
        }
        let relation = match prev_tok.map(|t| (&t.kind, t.keyword())) {
            None => clause == ClauseKeyword::From,
            Some((_, Some(Keyword::From | Keyword::Join | Keyword::Lateral))) => true,
            Some((_, Some(Keyword::As | Keyword::Materialized))) => clause == ClauseKeyword::With,
            Some((TokenKind::Comma, _)) => clause.introduces_relations(),
            _ => false,
        };
        if relation || starts_subquery(inner) {
            trace!(
                "Nested statement at offset {} (relation: {relation})",
                self.tokens[open].start
            );
            vec![StatementParser::new(inner, self.depth + 1).parse(relation)]
        } else {
            self.subqueries_within(inner)
        }
    }

    /// Subqueries anywhere inside a group that is not a statement itself,
    /// e.g. `coalesce((SELECT max(x) FROM t), 0)` or `a IN (SELECT ...)`.
    fn subqueries_within(&self, inner: &'t [Token]) -> Vec<Statement<'t>> {
        let mut found = Vec::new();
        let mut j = 0;
        while j < inner.len() {
            if inner[j].kind == TokenKind::ParenOpen && self.depth < MAX_NESTING_DEPTH {
                let (first, is_query) = leading_query(inner, j + 1);
                if is_query {
                    let close = matching_close(inner, j);
                    let body = &inner[j + 1..close];
                    found.push(StatementParser::new(body, self.depth + 1).parse(false));
                    j = close + 1;
                } else {
                    // Every `(` up to `first` leads to the same non-query token.
                    j = first;
                }
                continue;
            }
            j += 1;
        }
        found
    }

    /// CTE names declared in a WITH clause: every identifier that opens a
    /// comma-separated item at the clause's own level.
    fn cte_definitions(clause: &Clause<'t>) -> (Vec<String>, bool) {
        let recursive = clause.head().iter().any(|t| t.is_keyword(Keyword::Recursive));
        let body = clause.body();
        let mut names = Vec::new();
        let mut expect_name = true;
        let mut i = 0;
        while i < body.len() {
            let t = &body[i];
            match t.kind {
                TokenKind::ParenOpen => {
                    i = matching_close(body, i) + 1;
                    continue;
                }
                TokenKind::Comma => expect_name = true,
                TokenKind::Ident if expect_name => {
                    names.push(t.name().to_string());
                    expect_name = false;
                }
                _ if !t.is_trivia() => expect_name = false,
                _ => {}
            }
            i += 1;
        }
        (names, recursive)
    }
}
