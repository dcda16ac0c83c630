//! Script-level helpers built on the tokenizer and parser.

crate::reexport!(explain);
crate::reexport!(line_index);
