//! **Recursive structural comparison of arbitrary values.**
//!
//! `structdiff` compares two values of the same declared type field by field
//! and describes *where* they differ: which field is absent on which side,
//! which runtime types disagree, and which leaf values a comparator rejected.
//!
//! ## Core Concepts & Modules
//!
//! - **[`inspect`]**: the [`Inspect`] trait through which the engine sees a
//!   value's runtime type, identity, fields and text rendering. Implemented
//!   for std scalars, strings, `Option`, smart pointers, vectors, maps and
//!   `serde_json::Value`; plain structs get it from [`inspect_struct!`].
//! - **[`compare`]**: the [`CompareEngine`] (structural walker), the
//!   [`ComparatorRegistry`] of type-specific equality predicates and ignore
//!   sets, and the identity-keyed, content-checked [`MemoCache`].
//! - **[`report`]**: the [`Report`] tree produced by a comparison.
//! - **[`config`]**: engine and output settings, presets and YAML config
//!   files.
//! - **[`cli`]**: handlers behind the `structdiff` binary.
//!
//! ## Getting Started
//!
//! ```
//! use structdiff::{inspect_struct, CompareEngine, Report};
//!
//! #[derive(Debug)]
//! struct Address {
//!     city: String,
//! }
//!
//! #[derive(Debug)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     address: Address,
//! }
//!
//! inspect_struct!(Address { city });
//! inspect_struct!(Person { name, age, address });
//!
//! let engine = CompareEngine::new();
//! let a = Person { name: "Alice".into(), age: 30, address: Address { city: "Paris".into() } };
//! let b = Person { name: "Alice".into(), age: 31, address: Address { city: "Paris".into() } };
//!
//! let report = engine.compare(&a, &b);
//! let diffs = report.field_diffs().expect("only a leaf differs");
//! assert_eq!(diffs["age:0"], "30");
//! assert_eq!(diffs["age:1"], "31");
//! assert_eq!(report.to_string(), "age:0 = 30\nage:1 = 31");
//! ```
//!
//! ### Custom Comparators and Ignored Types
//!
//! ```
//! use structdiff::{inspect_struct, CompareEngine};
//!
//! #[derive(Debug)]
//! struct Tag {
//!     label: String,
//!     revision: u64,
//! }
//!
//! inspect_struct!(Tag { label, revision });
//!
//! let mut engine = CompareEngine::new();
//! engine
//!     .register::<String, _>(|a, b| a.eq_ignore_ascii_case(b))
//!     .ignore::<u64>();
//!
//! let a = Tag { label: "Stable".into(), revision: 1 };
//! let b = Tag { label: "STABLE".into(), revision: 7 };
//! assert!(engine.compare(&a, &b).is_equal());
//! ```
//!
//! ## Identity and Lifetimes
//!
//! The engine identifies values by address and runtime type. A memoized
//! result is only reused when both operands still hash to the content they
//! had when it was computed, so a dropped or mutated value whose address is
//! taken over by another never answers for it. Ignored instances have no
//! such check: they must outlive the comparisons that rely on them.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Ratios in cache statistics
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod inspect;
pub mod report;

// Re-export main types for convenience
pub use compare::{
    CacheStats, Comparator, ComparatorRegistry, CompareEngine, Fingerprint, MemoCache,
};
pub use config::{AppConfig, AppConfigBuilder, CompareConfig, ConfigPreset, CyclePolicy};
pub use config::{ConfigError, OutputConfig, OutputFormat, Validatable};
pub use error::{ComparatorError, ErrorContext, FieldAccessError, Result, StructDiffError};
pub use inspect::{AsAny, AsInspect, Field, FieldValue, Identity, Inspect, TypeKey};
pub use report::{FieldDiffs, Report, ReportKind, Side};
