use crate::*;
use itertools::Itertools;

/// Add a row bound of `row_limit` to every unbounded SELECT in `query`.
///
/// When at least one statement needs a bound, the script is re-emitted with
/// comments removed, one `;`-terminated statement per line, using the
/// dialect's primary bound syntax. Statements that already carry a bound, even
/// one written in a syntax the dialect does not accept, or that are not
/// SELECTs, are re-emitted unchanged apart from comment removal.
/// A script that needs no bound is returned exactly as given.
///
/// ```rust
/// use sqlscope::*;
///
/// let limited = get_limited_query("select * from t; drop table u", 10, Dialect::Generic);
/// assert_eq!(limited, "select * from t limit 10;\ndrop table u;");
/// ```
pub fn get_limited_query(query: &str, row_limit: u64, dialect: Dialect) -> String {
    let tokens = tokenize(query);
    let statements = parse_statements(&tokens);
    let mut bounded = 0usize;
    let rewritten = statements
        .iter()
        .map(|statement| {
            let text = statement.text_without_comments();
            if needs_bound(statement, dialect) {
                bounded += 1;
                format!("{};", with_bound(&text, row_limit, dialect))
            } else {
                format!("{text};")
            }
        })
        .join("\n");
    if bounded == 0 {
        return query.to_string();
    }
    debug!(
        "Bounded {bounded} of {} statement(s) to {row_limit} rows ({})",
        statements.len(),
        dialect.primary_bound()
    );
    rewritten
}

/// Comment-free text of the first SELECT in `query` that has no literal row
/// bound, including `LIMIT ALL` and parameterized bounds.
pub fn has_query_contain_unlimited_select(query: &str, dialect: Dialect) -> Option<String> {
    let tokens = tokenize(query);
    parse_statements(&tokens)
        .iter()
        .find(|s| s.is_select() && !matches!(outer_bound(s, dialect), OuterBound::Rows(_)))
        .map(Statement::text_without_comments)
}

fn needs_bound(statement: &Statement<'_>, dialect: Dialect) -> bool {
    statement.is_select()
        && outer_bound(statement, dialect) == OuterBound::Absent
        && !has_written_bound(statement)
}

fn with_bound(text: &str, row_limit: u64, dialect: Dialect) -> String {
    match dialect.primary_bound() {
        BoundSyntax::Limit => format!("{text} limit {row_limit}"),
        BoundSyntax::OffsetFetch => format!("{text} fetch first {row_limit} rows only"),
        BoundSyntax::Top => with_top(text, row_limit),
    }
}

/// Insert `top n` after `SELECT [DISTINCT|ALL]`. Set operations and queries
/// that open with a parenthesis are wrapped instead.
fn with_top(text: &str, row_limit: u64) -> String {
    let tokens = tokenize(text);
    let statements = parse_statements(&tokens);
    let anchor = statements.first().and_then(|s| {
        let set_operation = s
            .clauses
            .iter()
            .any(|c| matches!(c.keyword, ClauseKeyword::SetOperation(_)));
        if set_operation {
            return None;
        }
        let select = s.clause(ClauseKeyword::Select)?;
        select
            .significant_body()
            .next()
            .filter(|t| t.is_keyword(Keyword::Distinct) || t.is_keyword(Keyword::All))
            .or(select.head().last())
            .map(|t| t.end)
    });
    match anchor {
        Some(at) => {
            let byte = text.char_indices().nth(at).map_or(text.len(), |(b, _)| b);
            format!("{} top {row_limit}{}", &text[..byte], &text[byte..])
        }
        None => format!("select top {row_limit} * from ({text}) as limited"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("select * from t", Dialect::Generic, "select * from t limit 10;")]
    #[case("select * from t;", Dialect::Hive, "select * from t limit 10;")]
    #[case(
        "with a as (select 1) select * from a",
        Dialect::Generic,
        "with a as (select 1) select * from a limit 10;"
    )]
    #[case(
        "select * from (select * from t limit 5) x",
        Dialect::Generic,
        "select * from (select * from t limit 5) x limit 10;"
    )]
    #[case("select * from t", Dialect::Oracle, "select * from t fetch first 10 rows only;")]
    #[case("select a from t", Dialect::SqlServer, "select top 10 a from t;")]
    #[case("select distinct a from t", Dialect::SqlServer, "select distinct top 10 a from t;")]
    #[case("select top from t", Dialect::Generic, "select top from t limit 10;")]
    #[case(
        "select a from t union select b from u",
        Dialect::SqlServer,
        "select top 10 * from (select a from t union select b from u) as limited;"
    )]
    fn bounds_unbounded_selects(#[case] sql: &str, #[case] dialect: Dialect, #[case] expected: &str) {
        assert_eq!(get_limited_query(sql, 10, dialect), expected);
    }

    #[test]
    fn rewrites_whole_script_when_any_statement_changes() {
        let sql = "select * from t; -- note\nselect * from u limit 3;\ninsert into x values (1)";
        assert_eq!(
            get_limited_query(sql, 50, Dialect::Trino),
            "select * from t limit 50;\nselect * from u limit 3;\ninsert into x values (1);"
        );
    }

    #[rstest]
    #[case("select * from t limit 5 -- keep me", Dialect::Generic)]
    #[case("select * from t limit all", Dialect::Generic)]
    #[case("select top 5 * from t", Dialect::SqlServer)]
    #[case("select * from t limit 5", Dialect::Oracle)]
    #[case("select * from t fetch first 5 rows only", Dialect::Hive)]
    #[case("drop table t;\n\ninsert into t values (1)", Dialect::Generic)]
    #[case("", Dialect::Generic)]
    fn leaves_scripts_without_unbounded_selects_untouched(
        #[case] sql: &str,
        #[case] dialect: Dialect,
    ) {
        assert_eq!(get_limited_query(sql, 10, dialect), sql);
    }

    #[rstest]
    #[case("select * from t limit 5; select * from u -- x", Some("select * from u"))]
    #[case("select * from t limit all", Some("select * from t limit all"))]
    #[case("insert into t values (1); select 1 limit 1", None)]
    #[case("update t set a = 1", None)]
    fn finds_first_unlimited_select(#[case] sql: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            has_query_contain_unlimited_select(sql, Dialect::Generic).as_deref(),
            expected
        );
    }

    #[test]
    fn unsupported_bound_syntax_counts_as_unlimited() {
        let sql = "select * from t limit 5";
        assert!(has_query_contain_unlimited_select(sql, Dialect::Oracle).is_some());
        assert!(has_query_contain_unlimited_select(sql, Dialect::MySql).is_none());
    }
}
