//! Report data model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field diffs keyed `"<field>:0"` / `"<field>:1"`, values rendered as text,
/// in the order the discrepancies were found.
pub type FieldDiffs = IndexMap<String, String>;

/// Which operand of a comparison a report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The first operand (position 0)
    Left,
    /// The second operand (position 1)
    Right,
}

impl Side {
    /// Argument position: 0 for the left operand, 1 for the right.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Discriminator of a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Equal,
    NullMismatch,
    TypeMismatch,
    ValueMismatch,
    FieldDiffs,
    Composite,
    Nested,
    CycleDetected,
}

impl ReportKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NullMismatch => "null_mismatch",
            Self::TypeMismatch => "type_mismatch",
            Self::ValueMismatch => "value_mismatch",
            Self::FieldDiffs => "field_diffs",
            Self::Composite => "composite",
            Self::Nested => "nested",
            Self::CycleDetected => "cycle_detected",
        }
    }
}

/// Result of comparing two values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[must_use]
pub enum Report {
    /// Both values compared as the same
    #[default]
    Equal,
    /// Exactly one value was absent; `position` names the absent side
    NullMismatch { position: Side },
    /// The runtime types differ (left type, right type)
    TypeMismatch { left: String, right: String },
    /// Two leaf values compared directly (not as fields) were rejected by
    /// their comparator; both sides rendered as text
    ValueMismatch { left: String, right: String },
    /// Fields that differed under a registered comparator
    FieldDiffs { diffs: FieldDiffs },
    /// Nested field reports, optionally followed by one trailing `FieldDiffs`
    Composite { entries: Vec<Report> },
    /// A field name paired with the report for that field
    Nested { field: String, report: Box<Report> },
    /// The pair was already being compared further up the walk
    CycleDetected,
}

impl Report {
    /// Assemble the report for one level of structural recursion.
    ///
    /// No discrepancies collapse to `Equal`; comparator diffs alone stay a
    /// flat `FieldDiffs`; otherwise a `Composite` of the nested entries with
    /// the comparator diffs (if any) appended last.
    pub fn assemble(mut nested: Vec<Report>, diffs: FieldDiffs) -> Self {
        match (nested.is_empty(), diffs.is_empty()) {
            (true, true) => Self::Equal,
            (true, false) => Self::FieldDiffs { diffs },
            (false, true) => Self::Composite { entries: nested },
            (false, false) => {
                nested.push(Self::FieldDiffs { diffs });
                Self::Composite { entries: nested }
            }
        }
    }

    /// A named nested entry.
    pub fn nested(field: impl Into<String>, report: Report) -> Self {
        Self::Nested {
            field: field.into(),
            report: Box::new(report),
        }
    }

    /// True only for [`Report::Equal`].
    #[must_use]
    pub const fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }

    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::Equal => ReportKind::Equal,
            Self::NullMismatch { .. } => ReportKind::NullMismatch,
            Self::TypeMismatch { .. } => ReportKind::TypeMismatch,
            Self::ValueMismatch { .. } => ReportKind::ValueMismatch,
            Self::FieldDiffs { .. } => ReportKind::FieldDiffs,
            Self::Composite { .. } => ReportKind::Composite,
            Self::Nested { .. } => ReportKind::Nested,
            Self::CycleDetected => ReportKind::CycleDetected,
        }
    }

    /// The absent side of a `NullMismatch`.
    #[must_use]
    pub const fn null_position(&self) -> Option<Side> {
        match self {
            Self::NullMismatch { position } => Some(*position),
            _ => None,
        }
    }

    /// `(left, right)` type names of a `TypeMismatch`.
    #[must_use]
    pub fn type_names(&self) -> Option<(&str, &str)> {
        match self {
            Self::TypeMismatch { left, right } => Some((left.as_str(), right.as_str())),
            _ => None,
        }
    }

    /// `(left, right)` rendered values of a `ValueMismatch`.
    #[must_use]
    pub fn values(&self) -> Option<(&str, &str)> {
        match self {
            Self::ValueMismatch { left, right } => Some((left.as_str(), right.as_str())),
            _ => None,
        }
    }

    #[must_use]
    pub const fn field_diffs(&self) -> Option<&FieldDiffs> {
        match self {
            Self::FieldDiffs { diffs } => Some(diffs),
            _ => None,
        }
    }

    /// Entries of a `Composite`.
    #[must_use]
    pub fn entries(&self) -> Option<&[Report]> {
        match self {
            Self::Composite { entries } => Some(entries.as_slice()),
            _ => None,
        }
    }

    /// Field name and inner report of a `Nested` entry.
    #[must_use]
    pub fn as_nested(&self) -> Option<(&str, &Report)> {
        match self {
            Self::Nested { field, report } => Some((field.as_str(), report.as_ref())),
            _ => None,
        }
    }

    /// Find the nested entry for `field` directly inside a `Composite`.
    #[must_use]
    pub fn find_nested(&self, field: &str) -> Option<&Report> {
        self.entries()?
            .iter()
            .filter_map(Report::as_nested)
            .find_map(|(name, report)| (name == field).then_some(report))
    }

    /// Number of leaf discrepancies in this report.
    ///
    /// Each comparator mismatch counts once (not once per side).
    #[must_use]
    pub fn discrepancy_count(&self) -> usize {
        match self {
            Self::Equal => 0,
            Self::NullMismatch { .. }
            | Self::TypeMismatch { .. }
            | Self::ValueMismatch { .. }
            | Self::CycleDetected => 1,
            Self::FieldDiffs { diffs } => diffs.len().div_ceil(2),
            Self::Composite { entries } => entries.iter().map(Self::discrepancy_count).sum(),
            Self::Nested { report, .. } => report.discrepancy_count(),
        }
    }
}
