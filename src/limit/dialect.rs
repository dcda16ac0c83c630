use crate::*;
use std::str::FromStr;

/// Syntax a dialect accepts for bounding the rows of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BoundSyntax {
    /// `LIMIT n`, and MySQL-style `LIMIT offset, n`.
    #[display("LIMIT n")]
    Limit,
    /// `[OFFSET m {ROW|ROWS}] FETCH {FIRST|NEXT} [n] {ROW|ROWS} {ONLY|WITH TIES}`.
    #[display("FETCH FIRST n ROWS ONLY")]
    OffsetFetch,
    /// `SELECT [DISTINCT] TOP n` / `TOP (n)`.
    #[display("TOP n")]
    Top,
}

/// SQL dialects with distinct row-bound grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum Dialect {
    #[default]
    #[display("generic")]
    Generic,
    #[display("presto")]
    Presto,
    #[display("trino")]
    Trino,
    #[display("hive")]
    Hive,
    #[display("sparksql")]
    SparkSql,
    #[display("mysql")]
    MySql,
    #[display("postgresql")]
    PostgreSql,
    #[display("sqlite")]
    Sqlite,
    #[display("bigquery")]
    BigQuery,
    #[display("snowflake")]
    Snowflake,
    #[display("oracle")]
    Oracle,
    #[display("sqlserver")]
    SqlServer,
}

impl Dialect {
    pub const ALL: [Dialect; 12] = [
        Dialect::Generic,
        Dialect::Presto,
        Dialect::Trino,
        Dialect::Hive,
        Dialect::SparkSql,
        Dialect::MySql,
        Dialect::PostgreSql,
        Dialect::Sqlite,
        Dialect::BigQuery,
        Dialect::Snowflake,
        Dialect::Oracle,
        Dialect::SqlServer,
    ];

    /// Bound syntaxes the dialect accepts. The first entry is the one used
    /// when a bound has to be added to a query.
    pub fn bound_syntaxes(self) -> &'static [BoundSyntax] {
        use BoundSyntax::*;
        match self {
            Dialect::Trino | Dialect::PostgreSql => &[Limit, OffsetFetch],
            Dialect::Snowflake => &[Limit, OffsetFetch, Top],
            Dialect::Oracle => &[OffsetFetch],
            Dialect::SqlServer => &[Top, OffsetFetch],
            Dialect::Generic
            | Dialect::Presto
            | Dialect::Hive
            | Dialect::SparkSql
            | Dialect::MySql
            | Dialect::Sqlite
            | Dialect::BigQuery => &[Limit],
        }
    }

    pub fn supports(self, syntax: BoundSyntax) -> bool {
        self.bound_syntaxes().contains(&syntax)
    }

    /// Syntax used to add a bound to an unbounded query.
    pub fn primary_bound(self) -> BoundSyntax {
        self.bound_syntaxes()
            .first()
            .copied()
            .unwrap_or(BoundSyntax::Limit)
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Dialect::Generic => &["generic", "ansi"],
            Dialect::Presto => &["presto", "prestodb"],
            Dialect::Trino => &["trino"],
            Dialect::Hive => &["hive", "hiveql"],
            Dialect::SparkSql => &["sparksql", "spark", "databricks"],
            Dialect::MySql => &["mysql", "mariadb"],
            Dialect::PostgreSql => &["postgresql", "postgres", "redshift"],
            Dialect::Sqlite => &["sqlite"],
            Dialect::BigQuery => &["bigquery"],
            Dialect::Snowflake => &["snowflake"],
            Dialect::Oracle => &["oracle"],
            Dialect::SqlServer => &["sqlserver", "mssql", "tsql"],
        }
    }

    /// Lenient lookup: unknown names fall back to [`Dialect::Generic`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            debug!("Unknown dialect {name:?}, using generic LIMIT handling");
            Dialect::Generic
        })
    }

    /// The dialect named by the process configuration.
    pub fn configured() -> Self {
        Self::from_name(&config().default_dialect)
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Dialect::ALL
            .into_iter()
            .find(|d| d.aliases().iter().any(|a| a.eq_ignore_ascii_case(wanted)))
            .ok_or_else(|| Error::UnknownDialect(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trino", Dialect::Trino)]
    #[case("Postgres", Dialect::PostgreSql)]
    #[case(" mssql ", Dialect::SqlServer)]
    #[case("spark", Dialect::SparkSql)]
    fn parses_names_and_aliases(#[case] name: &str, #[case] expected: Dialect) {
        assert_eq!(name.parse::<Dialect>().unwrap(), expected);
    }

    #[test]
    fn strict_parse_rejects_unknown_names() {
        let err = "klingon".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, Error::UnknownDialect(ref name) if name == "klingon"));
    }

    #[test]
    fn lenient_lookup_falls_back_to_generic() {
        assert_eq!(Dialect::from_name("klingon"), Dialect::Generic);
        assert_eq!(Dialect::from_name("trino"), Dialect::Trino);
    }

    #[test]
    fn display_name_parses_back() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn configured_dialect_follows_config() {
        assert_eq!(
            Dialect::configured(),
            Dialect::from_name(&config().default_dialect)
        );
    }

    #[test]
    fn every_dialect_has_a_primary_bound() {
        assert_eq!(Dialect::Generic.primary_bound(), BoundSyntax::Limit);
        assert_eq!(Dialect::Oracle.primary_bound(), BoundSyntax::OffsetFetch);
        assert_eq!(Dialect::SqlServer.primary_bound(), BoundSyntax::Top);
        assert!(Dialect::Trino.supports(BoundSyntax::OffsetFetch));
        assert!(!Dialect::Hive.supports(BoundSyntax::OffsetFetch));
    }
}
