use crate::*;
use std::collections::BTreeMap;

/// A concrete table named in a FROM/JOIN position.
///
/// `start..end` spans the whole qualified name as written, schema prefix
/// included, e.g. `db.orders` but never a dangling trailing dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{schema}.{name}")]
pub struct TableReference {
    pub schema: String,
    pub name: String,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl TableReference {
    pub fn new(
        schema: impl Into<String>,
        name: impl Into<String>,
        line: usize,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            line,
            start,
            end,
        }
    }

    /// `schema.name`, as used for lineage lookups.
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

pub type AliasMap = BTreeMap<String, TableReference>;

/// Per-statement lineage, indexed by top-level statement position.
///
/// Both vectors have one entry per statement returned by
/// [`parse_statements`]; statements without tables get empty entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableReferences {
    /// Tables per statement, ordered by `(line, start)`.
    pub references: Vec<Vec<TableReference>>,
    /// Alias to table per statement; the last alias written wins.
    pub aliases: Vec<AliasMap>,
}

impl TableReferences {
    /// Every distinct `schema.name` across all statements, in first-seen order.
    pub fn tables(&self) -> Vec<String> {
        use itertools::Itertools;
        self.references
            .iter()
            .flatten()
            .map(TableReference::full_name)
            .unique()
            .collect()
    }

    /// Resolve an alias (or a bare table name) used inside statement `index`.
    pub fn resolve(&self, index: usize, name: &str) -> Option<&TableReference> {
        self.aliases
            .get(index)
            .and_then(|aliases| aliases.get(name))
            .or_else(|| {
                self.references
                    .get(index)?
                    .iter()
                    .find(|r| r.name.eq_ignore_ascii_case(name))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_qualified() {
        let r = TableReference::new("sales", "orders", 0, 14, 26);
        assert_eq!(r.to_string(), "sales.orders");
    }

    #[test]
    fn resolve_prefers_alias() {
        let orders = TableReference::new("default", "orders", 0, 14, 20);
        let users = TableReference::new("default", "users", 0, 30, 35);
        let found = TableReferences {
            references: vec![vec![orders.clone(), users.clone()]],
            aliases: vec![AliasMap::from([("users".to_string(), orders.clone())])],
        };
        assert_eq!(found.resolve(0, "users"), Some(&orders));
        assert_eq!(found.resolve(0, "USERS"), Some(&users));
        assert_eq!(found.resolve(0, "missing"), None);
        assert_eq!(found.resolve(3, "orders"), None);
    }

    #[test]
    fn tables_are_deduplicated() {
        let a = TableReference::new("default", "a", 0, 0, 1);
        let b = TableReference::new("default", "b", 1, 5, 6);
        let found = TableReferences {
            references: vec![vec![a.clone(), b], vec![a]],
            aliases: vec![AliasMap::new(), AliasMap::new()],
        };
        assert_eq!(found.tables(), vec!["default.a", "default.b"]);
    }
}
