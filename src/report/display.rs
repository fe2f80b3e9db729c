//! Text rendering of reports as an indented tree.

use super::Report;
use std::fmt::{self, Write as _};

const INDENT: &str = "  ";

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_tree(self, 0, &mut out)?;
        f.write_str(out.trim_end())
    }
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_tree(report: &Report, depth: usize, out: &mut String) -> fmt::Result {
    match report {
        Report::Equal => {
            pad(out, depth);
            writeln!(out, "equal")
        }
        Report::NullMismatch { position } => {
            pad(out, depth);
            writeln!(out, "null mismatch: {position} value is absent")
        }
        Report::TypeMismatch { left, right } => {
            pad(out, depth);
            writeln!(out, "type mismatch: {left} vs {right}")
        }
        Report::ValueMismatch { left, right } => {
            pad(out, depth);
            writeln!(out, "value mismatch: {left} vs {right}")
        }
        Report::CycleDetected => {
            pad(out, depth);
            writeln!(out, "cycle detected")
        }
        Report::FieldDiffs { diffs } => {
            for (key, value) in diffs {
                pad(out, depth);
                writeln!(out, "{key} = {value}")?;
            }
            Ok(())
        }
        Report::Composite { entries } => {
            for entry in entries {
                write_tree(entry, depth, out)?;
            }
            Ok(())
        }
        Report::Nested { field, report } => {
            pad(out, depth);
            writeln!(out, "{field}:")?;
            write_tree(report, depth + 1, out)
        }
    }
}
