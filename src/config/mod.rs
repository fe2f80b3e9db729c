//! Configuration module for structdiff.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common comparison styles
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```
//! use structdiff::config::{AppConfig, ConfigPreset, CyclePolicy};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//! assert_eq!(config.compare.cycle_policy, CyclePolicy::Report);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .memoize(false)
//!     .cycle_policy(CyclePolicy::AssumeEqual)
//!     .build();
//! ```
//!
//! # Configuration File
//!
//! Place a `.structdiff.yaml` file in your project root or `~/.config/structdiff/`:
//!
//! ```yaml
//! compare:
//!   builtin_comparators: true
//!   memoize: true
//!   cycle_policy: assume-equal
//! output:
//!   format: json
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, CompareConfig, CyclePolicy, OutputConfig, OutputFormat,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.structdiff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}
