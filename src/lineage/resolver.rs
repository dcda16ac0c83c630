use crate::*;
use itertools::Itertools;

/// Collect table references and aliases for every top-level statement.
///
/// Each statement's subtree (subqueries, derived tables, CTE bodies) is walked
/// depth-first; everything found anywhere below a top-level statement is
/// reported under that statement's index and ordered by position in the text.
/// Names of CTEs visible at the point of use are virtual relations and are
/// never reported. Unqualified tables get `default_schema`.
pub fn find_table_reference_and_alias(
    statements: &[Statement<'_>],
    default_schema: &str,
) -> TableReferences {
    let mut found = TableReferences::default();
    for (index, statement) in statements.iter().enumerate() {
        let mut collector = Collector {
            default_schema,
            references: Vec::new(),
            aliases: AliasMap::new(),
        };
        collector.visit(statement, &mut Vec::new());
        trace!(
            "Statement {index}: {} reference(s), {} alias(es)",
            collector.references.len(),
            collector.aliases.len()
        );
        found.references.push(
            collector
                .references
                .into_iter()
                .sorted_by_key(|r| (r.line, r.start))
                .collect(),
        );
        found.aliases.push(collector.aliases);
    }
    found
}

struct Collector<'a> {
    default_schema: &'a str,
    references: Vec<TableReference>,
    aliases: AliasMap,
}

/// CTE names visible from the current position, innermost scope last.
type Scopes<'s> = Vec<&'s [String]>;

impl Collector<'_> {
    fn visit<'s>(&mut self, statement: &'s Statement<'_>, scopes: &mut Scopes<'s>) {
        for clause in &statement.clauses {
            if clause.keyword == ClauseKeyword::With {
                // A CTE body sees the CTEs defined before it, and itself when recursive.
                for (k, body) in clause.nested_statements.iter().enumerate() {
                    let visible = if statement.recursive { k + 1 } else { k };
                    scopes.push(&statement.cte_names[..visible.min(statement.cte_names.len())]);
                    self.visit(body, scopes);
                    scopes.pop();
                }
                continue;
            }
            scopes.push(&statement.cte_names);
            if clause.keyword.introduces_relations() {
                self.relations(clause.body(), scopes);
            }
            for nested in &clause.nested_statements {
                self.visit(nested, scopes);
            }
            scopes.pop();
        }
    }

    /// Walk a FROM/JOIN body: `relation [AS] [alias] [, relation ...]`.
    fn relations(&mut self, body: &[Token], scopes: &Scopes<'_>) {
        let mut expect_relation = true;
        let mut i = 0;
        while let Some(at) = next_significant(body, i) {
            let tok = &body[at];
            match tok.kind {
                TokenKind::ParenOpen => {
                    // Derived tables are nested statements; only skip them here.
                    i = matching_close(body, at) + 1;
                    if expect_relation {
                        expect_relation = false;
                        i = alias_at(body, i).1;
                    }
                    continue;
                }
                TokenKind::Comma => expect_relation = true,
                TokenKind::Keyword(Keyword::Lateral) => {}
                TokenKind::Ident if expect_relation => {
                    expect_relation = false;
                    let (parts, next) = qualified_name(body, at);
                    let is_call = next_significant(body, next)
                        .is_some_and(|n| body[n].kind == TokenKind::ParenOpen);
                    if is_call {
                        i = next;
                        continue;
                    }
                    let (alias, after) = alias_at(body, next);
                    if parts.len() == 1 && is_cte(parts[0].name(), scopes) {
                        trace!("Skipping CTE reference {}", parts[0].value);
                    } else if let Some(reference) = self.reference(&parts) {
                        if let Some(alias) = alias {
                            self.aliases.insert(alias, reference.clone());
                        }
                        self.references.push(reference);
                    }
                    i = after;
                    continue;
                }
                _ => expect_relation = false,
            }
            i = at + 1;
        }
    }

    fn reference(&self, parts: &[&Token]) -> Option<TableReference> {
        let (first, last) = (parts.first()?, parts.last()?);
        let schema = match parts.len() {
            1 => self.default_schema.to_string(),
            n => parts[n - 2].name().to_string(),
        };
        Some(TableReference::new(
            schema,
            last.name(),
            first.line,
            first.start,
            last.end,
        ))
    }
}

fn is_cte(name: &str, scopes: &Scopes<'_>) -> bool {
    scopes
        .iter()
        .rev()
        .any(|scope| scope.iter().any(|cte| cte.eq_ignore_ascii_case(name)))
}

/// Dotted name starting at `at`. A trailing dot with nothing after it (as
/// while typing `schema.`) is not part of the name.
fn qualified_name(body: &[Token], at: usize) -> (Vec<&Token>, usize) {
    let mut parts = vec![&body[at]];
    let mut next = at + 1;
    loop {
        let Some(dot) = next_significant(body, next).filter(|&d| body[d].kind == TokenKind::Dot)
        else {
            break;
        };
        let Some(part) = next_significant(body, dot + 1).filter(|&p| {
            matches!(body[p].kind, TokenKind::Ident | TokenKind::Keyword(_))
        }) else {
            break;
        };
        parts.push(&body[part]);
        next = part + 1;
    }
    (parts, next)
}

/// Optional `[AS] alias` at or after `from`; returns the alias and the index
/// to continue scanning at.
fn alias_at(body: &[Token], from: usize) -> (Option<String>, usize) {
    let Some(n) = next_significant(body, from) else {
        return (None, from);
    };
    if body[n].is_keyword(Keyword::As) {
        return match next_significant(body, n + 1).filter(|&m| body[m].is_ident()) {
            Some(m) => (Some(body[m].name().to_string()), m + 1),
            None => (None, n + 1),
        };
    }
    if body[n].is_ident() {
        return (Some(body[n].name().to_string()), n + 1);
    }
    (None, from)
}
