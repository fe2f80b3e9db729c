//! Configuration types for structdiff.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Comparison engine settings
    pub compare: CompareConfig,
    /// Output configuration (format, file)
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Install the `PartialEq` comparators for std leaf types.
    pub const fn builtin_comparators(mut self, enabled: bool) -> Self {
        self.config.compare.builtin_comparators = enabled;
        self
    }

    /// Enable the memoization cache.
    pub const fn memoize(mut self, enabled: bool) -> Self {
        self.config.compare.memoize = enabled;
        self
    }

    pub const fn cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.config.compare.cycle_policy = policy;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Comparison Settings
// ============================================================================

/// What the walker does when it reaches a pair it is already comparing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CyclePolicy {
    /// Treat the revisited pair as equal; differences elsewhere in the cycle
    /// are still reported
    #[default]
    AssumeEqual,
    /// Record a `cycle_detected` entry at the point of revisit
    Report,
}

impl CyclePolicy {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AssumeEqual => "assume-equal",
            Self::Report => "report",
        }
    }
}

impl std::fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for [`CompareEngine`](crate::CompareEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CompareConfig {
    /// Pre-register `PartialEq` comparators for integers, floats, bool,
    /// char, strings and JSON numbers
    pub builtin_comparators: bool,
    /// Memoize completed comparisons by operand identity
    pub memoize: bool,
    /// Behavior on revisiting a pair already under comparison
    pub cycle_policy: CyclePolicy,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            builtin_comparators: true,
            memoize: true,
            cycle_policy: CyclePolicy::AssumeEqual,
        }
    }
}

// ============================================================================
// Output Settings
// ============================================================================

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented text tree
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "tree" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.compare.builtin_comparators);
        assert!(config.compare.memoize);
        assert_eq!(config.compare.cycle_policy, CyclePolicy::AssumeEqual);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.file.is_none());
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .memoize(false)
            .cycle_policy(CyclePolicy::Report)
            .output_format(OutputFormat::Json)
            .build();
        assert!(!config.compare.memoize);
        assert_eq!(config.compare.cycle_policy, CyclePolicy::Report);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig =
            serde_yaml_ng::from_str("compare:\n  cycle_policy: report\n").expect("valid yaml");
        assert_eq!(config.compare.cycle_policy, CyclePolicy::Report);
        assert!(config.compare.builtin_comparators);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("tree".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
