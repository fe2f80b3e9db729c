//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod compare;
mod input;
mod output;

pub use compare::run_compare;
pub use input::{load_document, parse_document, DocumentFormat};
pub use output::{render_report, write_output, OutputTarget};

use crate::config::AppConfig;
use std::path::PathBuf;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// The documents are structurally equal
    pub const SUCCESS: i32 = 0;
    /// Differences were found
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Inputs and settings for one `compare` invocation.
#[derive(Debug, Clone)]
pub struct CompareJob {
    /// Path to the left (first) document
    pub left: PathBuf,
    /// Path to the right (second) document
    pub right: PathBuf,
    pub config: AppConfig,
}

impl CompareJob {
    #[must_use]
    pub const fn new(left: PathBuf, right: PathBuf, config: AppConfig) -> Self {
        Self {
            left,
            right,
            config,
        }
    }
}
