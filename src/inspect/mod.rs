//! Runtime introspection for compared values.
//!
//! The comparison engine has no compile-time knowledge of the types it walks.
//! Instead every comparable type implements [`Inspect`], which exposes:
//!
//! - its runtime type ([`TypeKey`]) and address ([`Identity`]),
//! - the list of its fields as `(name, value)` pairs,
//! - a canonical text rendering used in diff reports,
//! - a normalization step ([`Inspect::as_present`]) that unwraps pointers and
//!   turns "no value" representations (`None`, an unset `OnceLock`, JSON
//!   `null`) into absence.
//!
//! Plain structs get an implementation from [`inspect_struct!`](crate::inspect_struct).
//! Implementations for std leaves, smart pointers and collections live in
//! `impls`, and `serde_json::Value` is supported out of the box.
//!
//! # Example
//!
//! ```
//! use structdiff::{inspect_struct, CompareEngine};
//!
//! #[derive(Debug)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! inspect_struct!(Person { name, age });
//!
//! let engine = CompareEngine::new();
//! let a = Person { name: "Alice".into(), age: 30 };
//! let b = Person { name: "Alice".into(), age: 31 };
//! assert!(!engine.compare(&a, &b).is_equal());
//! ```

mod impls;
mod json;
mod macros;
mod types;

pub use types::{AsAny, AsInspect, Field, FieldValue, Identity, Inspect, TypeKey};
