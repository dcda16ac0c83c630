//! Shallow statement / clause structure over a token stream.
//!
//! The parser does not validate SQL. It only answers the questions the
//! analyses need: where a statement starts and ends, which keyword-introduced
//! clauses it has at its own nesting level, and which parenthesized groups are
//! statements in their own right (subqueries, derived tables, CTE bodies).

crate::reexport!(clause);
crate::reexport!(statement);
crate::reexport!(parser);
