#![cfg(test)]
use crate::*;
use rstest::rstest;

const SCHEMA: &str = "default";

fn analyze(sql: &str) -> TableReferences {
    resolve_tables(sql, SCHEMA)
}

fn names(found: &TableReferences, index: usize) -> Vec<String> {
    found.references[index]
        .iter()
        .map(TableReference::full_name)
        .collect()
}

fn table(name: &str, line: usize, start: usize, end: usize) -> TableReference {
    TableReference::new(SCHEMA, name, line, start, end)
}

#[test]
fn cte_names_are_never_references() {
    let found = analyze(
        "WITH t3 AS (SELECT * FROM t4) SELECT * FROM t2 WHERE x = (SELECT SUM(t1.f) FROM t1 JOIN t3 ON t1.f = t3.f WHERE t1.g = t2.g)",
    );
    assert_eq!(
        found.references[0],
        vec![table("t4", 0, 26, 28), table("t2", 0, 44, 46), table("t1", 0, 80, 82)]
    );
    assert_eq!(found.aliases[0], AliasMap::new());
}

#[test]
fn keyword_inside_function_call_is_not_a_from() {
    let found =
        analyze("SELECT * FROM t2 JOIN t1 ON t1.f1 = t2.f2 AND extract(YEAR FROM f1_date) = t2.fy");
    assert_eq!(
        found.references[0],
        vec![table("t2", 0, 14, 16), table("t1", 0, 22, 24)]
    );
}

#[test]
fn aliases_map_to_their_references() {
    let found = analyze("SELECT aa.a, bb.b\nFROM table_a aa\nJOIN table_b bb ON aa.id = bb.id");
    let table_a = table("table_a", 1, 23, 30);
    let table_b = table("table_b", 2, 39, 46);
    assert_eq!(found.references[0], vec![table_a.clone(), table_b.clone()]);
    assert_eq!(
        found.aliases[0],
        AliasMap::from([("aa".to_string(), table_a), ("bb".to_string(), table_b)])
    );
}

#[test]
fn qualified_names_span_the_schema_prefix() {
    let found = analyze("select * from sales.orders AS o, `raw`.`events` e");
    assert_eq!(
        found.references[0],
        vec![
            TableReference::new("sales", "orders", 0, 14, 26),
            TableReference::new("raw", "events", 0, 33, 47),
        ]
    );
    assert_eq!(found.aliases[0]["o"].name, "orders");
    assert_eq!(found.aliases[0]["e"].schema, "raw");
}

#[test]
fn trailing_dot_is_not_part_of_the_name() {
    let found = analyze("select * from aa.a, aa.");
    assert_eq!(
        found.references[0],
        vec![
            TableReference::new("aa", "a", 0, 14, 18),
            table("aa", 0, 20, 22),
        ]
    );
}

#[test]
fn references_are_grouped_by_top_level_statement() {
    let found = analyze("select * from a;\nselect * from (select * from b) x join c on 1 = 1;\ndrop table d");
    assert_eq!(found.references.len(), 3);
    assert_eq!(names(&found, 0), vec!["default.a"]);
    assert_eq!(names(&found, 1), vec!["default.b", "default.c"]);
    assert!(found.references[2].is_empty());
    assert!(found.aliases[1].get("x").is_none());
}

#[test]
fn nested_references_are_ordered_by_position() {
    let found = analyze(
        "select * from z\nwhere id in (select id from y where k in (select k from x))\nand exists (select 1 from w)",
    );
    assert_eq!(
        names(&found, 0),
        vec!["default.z", "default.y", "default.x", "default.w"]
    );
}

#[test]
fn last_alias_wins() {
    let found = analyze("select * from t a join u a on 1 = 1");
    assert_eq!(found.aliases[0]["a"].name, "u");
    assert_eq!(names(&found, 0), vec!["default.t", "default.u"]);
}

#[rstest]
#[case("select * from t", vec!["default.t"])]
#[case("select * from t1, t2 x, t3 as y", vec!["default.t1", "default.t2", "default.t3"])]
#[case("select * from a left outer join b using (id) cross join c", vec!["default.a", "default.b", "default.c"])]
#[case("select * from (a join b on a.id = b.id) ab", vec!["default.a", "default.b"])]
#[case("select * from unnest(array[1, 2]) u join t on true", vec!["default.t"])]
#[case("select * from {{ source_table }} s join t on true", vec!["default.t"])]
#[case("select * from t, lateral (select * from u where u.id = t.id) l", vec!["default.t", "default.u"])]
#[case("delete from t where id in (select id from u)", vec!["default.t", "default.u"])]
#[case("insert into t select * from s", vec!["default.s"])]
#[case("select a is distinct from b from t", vec!["default.t"])]
#[case("select * from `weird name`", vec!["default.weird name"])]
#[case("select * from t where id = any (select id from u)", vec!["default.t", "default.u"])]
#[case("select array(select id from u) from t", vec!["default.u", "default.t"])]
#[case("select * from t where id = some (select id from u where u.k = 1)", vec!["default.t", "default.u"])]
#[case("select 1", vec![])]
fn finds_relations(#[case] sql: &str, #[case] expected: Vec<&str>) {
    assert_eq!(names(&analyze(sql), 0), expected);
}

#[rstest]
// A CTE shadows a real table of the same name everywhere after its definition.
#[case("with t as (select * from src) select * from t join (select * from t) x on true", vec!["default.src"])]
// Non-recursive CTE bodies see only earlier CTEs, so `a` inside its own body is a real table.
#[case("with a as (select * from a), b as (select * from a) select * from b", vec!["default.a"])]
#[case("with recursive r as (select 1 from seed union all select n from r) select * from r", vec!["default.seed"])]
// CTE names match case-insensitively.
#[case("WITH Recent AS (SELECT * FROM events) SELECT * FROM RECENT", vec!["default.events"])]
// A schema-qualified name is never a CTE.
#[case("with t as (select 1) select * from db.t", vec!["db.t"])]
// CTEs declared in a nested statement only cover that statement.
#[case("select * from (with q as (select * from r) select * from q) x, q", vec!["default.r", "default.q"])]
// The query of CTAS and INSERT may open with its own WITH.
#[case("create table out as with x as (select * from src) select * from x", vec!["default.src"])]
#[case("insert into out with x as (select * from src) select * from x", vec!["default.src"])]
#[case("insert into out (a, b) with recursive x as (select * from src union all select * from x) select * from x", vec!["default.src"])]
fn resolves_cte_scopes(#[case] sql: &str, #[case] expected: Vec<&str>) {
    assert_eq!(names(&analyze(sql), 0), expected);
}

#[test]
fn default_schema_is_a_parameter() {
    let tokens = tokenize("select * from t join other.u on true");
    let statements = parse_statements(&tokens);
    let a = find_table_reference_and_alias(&statements, "warehouse");
    let b = find_table_reference_and_alias(&statements, "lake");
    assert_eq!(a.references[0][0].schema, "warehouse");
    assert_eq!(b.references[0][0].schema, "lake");
    assert_eq!(a.references[0][1].schema, "other");
}
