//! Table lineage: which external tables a statement reads, and under which
//! aliases.

crate::reexport!(reference);
crate::reexport!(resolver);

#[cfg(test)]
mod resolver_tests;
