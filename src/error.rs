//! Unified error types for structdiff.
//!
//! The comparison engine itself never fails: every foreseeable problem is
//! absorbed into the [`Report`](crate::report::Report) or logged and
//! skipped. The types here cover the fallible edges around it (loading input
//! documents, validating configuration, custom comparators and unreadable
//! fields).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for structdiff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StructDiffError {
    /// Errors while loading a document to compare
    #[error("Failed to load input: {context}")]
    Input {
        context: String,
        #[source]
        source: InputErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration that failed validation
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Specific input error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("Invalid JSON document: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML document: {0}")]
    InvalidYaml(String),

    #[error("Document is neither JSON nor YAML")]
    UnknownFormat,
}

/// Failure raised by a registered comparator.
///
/// The walker never propagates these; a failing comparator marks the field
/// as differing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ComparatorError {
    /// The comparator was handed values of a type it was not registered for
    #[error("comparator for {expected} received a value of another type")]
    Downcast { expected: &'static str },

    /// The comparator reported an error of its own
    #[error("comparator for {type_name} failed: {message}")]
    Failed {
        type_name: &'static str,
        message: String,
    },

    /// The comparator panicked
    #[error("comparator for {type_name} panicked: {message}")]
    Panicked {
        type_name: &'static str,
        message: String,
    },
}

/// A field that could not be read during traversal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field '{field}' is unreadable: {reason}")]
pub struct FieldAccessError {
    pub field: String,
    pub reason: String,
}

impl FieldAccessError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for structdiff operations
pub type Result<T> = std::result::Result<T, StructDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl StructDiffError {
    /// Create an input error with context
    pub fn input(context: impl Into<String>, source: InputErrorKind) -> Self {
        Self::Input {
            context: context.into(),
            source,
        }
    }

    /// Create an input error for a document of unknown format
    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::input(format!("at {}", path.into()), InputErrorKind::UnknownFormat)
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for StructDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for StructDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::input("JSON deserialization", InputErrorKind::InvalidJson(err.to_string()))
    }
}

impl From<serde_yaml_ng::Error> for StructDiffError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::input("YAML deserialization", InputErrorKind::InvalidYaml(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, outermost first, so the final message reads
/// as the path through the code that failed.
///
/// # Example
///
/// ```ignore
/// use structdiff::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<serde_json::Value> {
///     let content = std::fs::read_to_string(path).context("reading document")?;
///     serde_json::from_str(&content)
///         .with_context(|| format!("parsing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<StructDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: StructDiffError, new_ctx: &str) -> StructDiffError {
    match err {
        StructDiffError::Input {
            context: existing,
            source,
        } => StructDiffError::Input {
            context: chain_context(new_ctx, &existing),
            source,
        },
        StructDiffError::Io {
            path,
            message,
            source,
        } => StructDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        StructDiffError::Validation(msg) => {
            StructDiffError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
