//! Structural comparison.
//!
//! [`CompareEngine`] walks two values field by field through their
//! [`Inspect`](crate::Inspect) implementations and produces a
//! [`Report`](crate::Report). Along the way it consults:
//!
//! - the [`ComparatorRegistry`] for type-specific equality predicates and the
//!   types or instances to skip,
//! - the [`MemoCache`] for results of pairs it has already finished, validated
//!   against a content fingerprint of both operands.
//!
//! Cycles are detected per call from the stack of pairs being compared, so
//! one engine can serve any number of threads.

mod builtins;
mod cache;
mod engine;
mod fingerprint;
mod registry;

pub use cache::{CacheStats, Fingerprint, MemoCache};
pub use engine::CompareEngine;
pub use registry::{Comparator, ComparatorRegistry};
