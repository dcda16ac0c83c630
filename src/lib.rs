//! Lexical and structural analysis of SQL scripts for editor assistance.
//!
//! The crate turns raw query text into a position-preserving token stream,
//! groups the tokens into statements and clauses, and derives table lineage,
//! row bounds and line offsets from that structure. Every entry point is a
//! pure function over its input; malformed SQL yields best-effort results.
//!
//! ```rust
//! use sqlscope::*;
//!
//! let tokens = tokenize("SELECT * FROM db.orders o JOIN users u ON o.uid = u.id");
//! let statements = parse_statements(&tokens);
//! let found = find_table_reference_and_alias(&statements, "default");
//! assert_eq!(found.references[0].len(), 2);
//! assert_eq!(found.aliases[0]["o"].name, "orders");
//! ```

reexport!(testing, test);
reexport!(config);
reexport!(error);
reexport!(sql);
reexport!(structure);
reexport!(lineage);
reexport!(limit);
reexport!(query);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
