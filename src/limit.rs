//! Row-bound detection and injection for SELECT statements.
//!
//! Only the outermost query of a statement is inspected; a `LIMIT` inside a
//! subquery never bounds the rows a statement returns.

crate::reexport!(dialect);
crate::reexport!(extractor);
crate::reexport!(limiter);
