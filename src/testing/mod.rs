#![cfg(test)]
use crate::{TableReferences, find_table_reference_and_alias, parse_statements, tokenize};
pub use rstest::*;

/// Route `tracing` output through the test harness; filtered by `RUST_LOG`.
pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// Tokenize and parse `sql`, then resolve tables against `schema`.
pub(crate) fn resolve_tables(sql: &str, schema: &str) -> TableReferences {
    common_init();
    let tokens = tokenize(sql);
    let statements = parse_statements(&tokens);
    find_table_reference_and_alias(&statements, schema)
}
