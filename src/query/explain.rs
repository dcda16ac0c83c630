use crate::*;
use itertools::Itertools;

/// Each statement of `script` with comments removed and whitespace trimmed.
pub fn get_statements_from_query(script: &str) -> Vec<String> {
    let tokens = tokenize(script);
    parse_statements(&tokens)
        .iter()
        .map(Statement::text_without_comments)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Prefix every statement of `script` with `EXPLAIN`.
///
/// ```rust
/// use sqlscope::*;
///
/// let explained = get_query_as_explain("select 1; --ignore\nselect 2;\nselect 3 --test");
/// assert_eq!(explained, "EXPLAIN select 1;\nEXPLAIN select 2;\nEXPLAIN select 3;");
/// ```
pub fn get_query_as_explain(script: &str) -> String {
    get_statements_from_query(script)
        .iter()
        .map(|statement| format!("EXPLAIN {statement};"))
        .join("\n")
}
