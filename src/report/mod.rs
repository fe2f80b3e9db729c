//! Comparison reports.
//!
//! Every comparison, at any recursion depth, yields a [`Report`]. Callers
//! pattern-match on the variants (or use the accessors) to present diffs;
//! the `Display` implementation renders an indented tree.

mod display;
mod types;

pub use types::{FieldDiffs, Report, ReportKind, Side};
