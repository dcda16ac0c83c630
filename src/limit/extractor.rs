use crate::*;

/// Row bound found on the outermost query of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OuterBound {
    /// No bound clause at all.
    Absent,
    /// A literal row count.
    Rows(i64),
    /// A bound clause whose count is not a literal (`LIMIT ALL`, a parameter,
    /// a template or an expression).
    Opaque,
}

impl OuterBound {
    fn as_limit(self) -> i64 {
        match self {
            OuterBound::Rows(n) => n,
            OuterBound::Absent | OuterBound::Opaque => -1,
        }
    }
}

/// Row bound of the first statement in `query`.
///
/// Returns `None` when the statement is not a SELECT, `Some(-1)` when its
/// outermost query has no literal bound, and `Some(n)` otherwise. Bounds inside
/// subqueries, CTE bodies or set-operation branches other than the last are
/// ignored, so `SELECT * FROM (SELECT * FROM t LIMIT 5) x` is unbounded.
///
/// ```rust
/// use sqlscope::*;
///
/// let sql = "select * from (select * from t limit 5) x limit 10";
/// assert_eq!(get_select_statement_limit(sql, Dialect::Generic), Some(10));
/// assert_eq!(get_select_statement_limit("drop table t", Dialect::Generic), None);
/// ```
pub fn get_select_statement_limit(query: &str, dialect: Dialect) -> Option<i64> {
    let tokens = tokenize(query);
    let statements = parse_statements(&tokens);
    let statement = statements.first()?;
    if !statement.is_select() {
        return None;
    }
    Some(outer_bound(statement, dialect).as_limit())
}

/// Bound on the outermost query of a SELECT statement, as `dialect` reads it.
pub(crate) fn outer_bound(statement: &Statement<'_>, dialect: Dialect) -> OuterBound {
    let bound = bound_with(statement, |syntax| dialect.supports(syntax));
    trace!("Outer bound {bound:?} under {dialect}");
    bound
}

/// Whether the outermost query carries a bound clause in any dialect's syntax,
/// understood by the target dialect or not.
pub(crate) fn has_written_bound(statement: &Statement<'_>) -> bool {
    bound_with(statement, |_| true) != OuterBound::Absent
}

fn bound_with(statement: &Statement<'_>, supports: impl Fn(BoundSyntax) -> bool) -> OuterBound {
    let clauses = &statement.clauses;
    let tail_start = clauses
        .iter()
        .rposition(|c| matches!(c.keyword, ClauseKeyword::SetOperation(_)))
        .map_or(0, |p| p + 1);

    let mut bound = OuterBound::Absent;
    for clause in &clauses[tail_start..] {
        let found = match clause.keyword {
            ClauseKeyword::Limit if supports(BoundSyntax::Limit) => limit_count(clause),
            ClauseKeyword::Fetch if supports(BoundSyntax::OffsetFetch) => fetch_count(clause),
            // TOP belongs to a single branch; it cannot bound a set operation.
            ClauseKeyword::Select if tail_start == 0 && supports(BoundSyntax::Top) => {
                top_count(clause)
            }
            _ => OuterBound::Absent,
        };
        if found != OuterBound::Absent {
            bound = found;
        }
    }
    bound
}

fn literal(token: Option<&Token>) -> Option<i64> {
    token
        .filter(|t| t.kind == TokenKind::Number)
        .and_then(|t| t.value.parse().ok())
}

/// `LIMIT n`, `LIMIT offset, n`, `LIMIT ALL`.
fn limit_count(clause: &Clause<'_>) -> OuterBound {
    let body: Vec<&Token> = clause.significant_body().collect();
    let count = match body.as_slice() {
        [first, comma, second, ..] if comma.kind == TokenKind::Comma => {
            literal(Some(*second)).filter(|_| first.kind == TokenKind::Number)
        }
        [only] => literal(Some(*only)),
        [first, next, ..] if next.is_keyword(Keyword::Offset) || next.is_word("rows") => {
            literal(Some(*first))
        }
        _ => None,
    };
    count.map_or(OuterBound::Opaque, OuterBound::Rows)
}

/// `FETCH {FIRST|NEXT} [n] {ROW|ROWS} {ONLY|WITH TIES}`; a missing count
/// fetches one row.
fn fetch_count(clause: &Clause<'_>) -> OuterBound {
    let mut body = clause.significant_body();
    if !body.next().is_some_and(|t| t.is_word("first") || t.is_word("next")) {
        return OuterBound::Opaque;
    }
    match body.next() {
        Some(t) if t.is_word("row") || t.is_word("rows") => OuterBound::Rows(1),
        count => match (literal(count), body.next()) {
            (Some(_), Some(unit)) if unit.is_word("percent") => OuterBound::Opaque,
            (Some(n), _) => OuterBound::Rows(n),
            (None, _) => OuterBound::Opaque,
        },
    }
}

/// `SELECT [ALL|DISTINCT] TOP n` or `TOP (n)`.
fn top_count(clause: &Clause<'_>) -> OuterBound {
    let mut body = clause
        .significant_body()
        .skip_while(|t| t.is_keyword(Keyword::Distinct) || t.is_keyword(Keyword::All));
    if !body.next().is_some_and(|t| t.is_word("top")) {
        return OuterBound::Absent;
    }
    let count = match body.next() {
        // A column named `top`.
        None => return OuterBound::Absent,
        Some(t) if t.kind == TokenKind::Comma => return OuterBound::Absent,
        Some(t) if t.kind == TokenKind::ParenOpen => literal(body.next()),
        t => literal(t),
    };
    match (count, body.next()) {
        (Some(_), Some(unit)) if unit.is_word("percent") => OuterBound::Opaque,
        (Some(n), _) => OuterBound::Rows(n),
        (None, _) => OuterBound::Opaque,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("select * from t", -1)]
    #[case("select * from t limit 5", 5)]
    #[case("SELECT * FROM t LIMIT 5 OFFSET 10", 5)]
    #[case("select * from t limit 10, 20", 20)]
    #[case("select * from t limit all", -1)]
    #[case("select * from t limit {{ n }}", -1)]
    #[case("select * from t limit ?", -1)]
    #[case("select * from (select * from t limit 5) x", -1)]
    #[case("select * from (select * from t limit 5) x limit 10", 10)]
    #[case("with a as (select * from t limit 3) select * from a", -1)]
    #[case("with a as (select * from t limit 3) select * from a limit 7", 7)]
    #[case("select * from t where id in (select id from u limit 1)", -1)]
    #[case("select 1 limit 5 union all select 2", -1)]
    #[case("(select 1) union all (select 2) limit 4", 4)]
    #[case("select count(*) from t -- limit 5", -1)]
    #[case("select 'limit 5' from t", -1)]
    fn generic_limits(#[case] sql: &str, #[case] expected: i64) {
        assert_eq!(get_select_statement_limit(sql, Dialect::Generic), Some(expected));
    }

    #[rstest]
    #[case("select * from t offset 10 fetch next 20 rows only", Dialect::Trino, 20)]
    #[case("select * from t fetch first row only", Dialect::PostgreSql, 1)]
    #[case("select * from t fetch first 3 rows with ties", Dialect::Oracle, 3)]
    #[case("select * from t fetch first 10 percent rows only", Dialect::Oracle, -1)]
    #[case("select * from t fetch first 3 rows only", Dialect::Hive, -1)]
    #[case("select top 10 * from t", Dialect::SqlServer, 10)]
    #[case("select distinct top (5) a from t", Dialect::SqlServer, 5)]
    #[case("select top 10 percent * from t", Dialect::SqlServer, -1)]
    #[case("select top 10 * from t", Dialect::Generic, -1)]
    #[case("select top 2 * from t union select top 3 * from u", Dialect::SqlServer, -1)]
    #[case("select top from t", Dialect::SqlServer, -1)]
    #[case("select * from t limit 5", Dialect::Oracle, -1)]
    #[case("select * from t limit 5", Dialect::Snowflake, 5)]
    fn dialect_specific_limits(#[case] sql: &str, #[case] dialect: Dialect, #[case] expected: i64) {
        assert_eq!(get_select_statement_limit(sql, dialect), Some(expected));
    }

    #[rstest]
    #[case("insert into t select * from s limit 5")]
    #[case("drop table t")]
    #[case("update t set a = 1")]
    #[case("with a as (select 1) delete from t")]
    #[case("")]
    #[case("-- only a comment")]
    fn non_select_has_no_limit(#[case] sql: &str) {
        assert_eq!(get_select_statement_limit(sql, Dialect::Generic), None);
    }

    #[test]
    fn first_statement_governs() {
        let sql = "select * from t limit 5; drop table t";
        assert_eq!(get_select_statement_limit(sql, Dialect::Generic), Some(5));
        let sql = "drop table t; select * from t limit 5";
        assert_eq!(get_select_statement_limit(sql, Dialect::Generic), None);
    }
}
