//! Named presets for common comparison styles.

use super::types::{AppConfig, CompareConfig, CyclePolicy, OutputConfig};

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Built-in leaf comparators, memoization, cycles assumed equal
    Default,
    /// Like default, but revisited cycles are reported as discrepancies
    Strict,
    /// No built-in comparators: only shape, absence and types are compared
    Structural,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Structural => "structural",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "strict" | "exact" => Some(Self::Strict),
            "structural" | "shape" => Some(Self::Structural),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Compare leaf values with PartialEq and assume cycles are equal",
            Self::Strict => "Compare leaf values and report every revisited cycle",
            Self::Structural => "Compare only shape, absence and runtime types",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Structural]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        Self {
            compare: CompareConfig::from_preset(preset),
            output: OutputConfig::default(),
        }
    }
}

impl CompareConfig {
    /// Engine settings for a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self {
                cycle_policy: CyclePolicy::Report,
                ..Self::default()
            },
            ConfigPreset::Structural => Self {
                builtin_comparators: false,
                ..Self::default()
            },
        }
    }
}
