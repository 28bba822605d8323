//! Configuration and constants for the analyzer and CLI.
//!
//! Analyzer settings can come from a TOML file; CLI flags are applied on top.
//!
//! ```toml
//! top_k = 15
//! cleanup_policy = "per-run"
//! token_extraction = "named"
//! attribute_rules = true
//! ```

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Default number of entries in each ranking
pub const DEFAULT_TOP_K: usize = 10;

/// Upper bound for `top_k`
pub const MAX_TOP_K: usize = 1000;

/// Maximum number of trace files accepted by one `analyze` invocation
pub const MAX_TRACE_FILES: usize = 2;

/// Stack id the parser starts every parse with
pub const ROOT_STACK_ID: u64 = 0;

/// What a run boundary (`Cleanup:`, `[PASS]`, `[FAIL]`) does to the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupPolicy {
    /// Counters accumulate across the whole trace
    #[default]
    Global,
    /// Each run is additionally reported on its own
    PerRun,
}

/// How the token symbol is pulled out of a `Next token is token` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenExtraction {
    /// Fifth whitespace-separated field
    #[default]
    Positional,
    /// Named regex capture, stopping at `(`
    Named,
}

impl FromStr for CleanupPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "per-run" | "per_run" | "run" => Ok(Self::PerRun),
            other => Err(ConfigError::Invalid(format!(
                "unknown cleanup policy '{}' (expected 'global' or 'per-run')",
                other
            ))),
        }
    }
}

impl fmt::Display for CleanupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::PerRun => write!(f, "per-run"),
        }
    }
}

impl FromStr for TokenExtraction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positional" => Ok(Self::Positional),
            "named" => Ok(Self::Named),
            other => Err(ConfigError::Invalid(format!(
                "unknown token extraction '{}' (expected 'positional' or 'named')",
                other
            ))),
        }
    }
}

impl fmt::Display for TokenExtraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional => write!(f, "positional"),
            Self::Named => write!(f, "named"),
        }
    }
}

/// Settings for one analysis pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of entries kept in each ranking
    pub top_k: usize,

    /// Counter handling at run boundaries
    pub cleanup_policy: CleanupPolicy,

    /// Token symbol extraction strategy
    pub token_extraction: TokenExtraction,

    /// Attribute splits to the parent stack's last reduction
    pub attribute_rules: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            cleanup_policy: CleanupPolicy::Global,
            token_extraction: TokenExtraction::Positional,
            attribute_rules: true,
        }
    }
}

impl AnalyzerConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::Invalid("top_k must be greater than 0".to_string()));
        }

        if self.top_k > MAX_TOP_K {
            return Err(ConfigError::Invalid(format!(
                "top_k is too large (max {})",
                MAX_TOP_K
            )));
        }

        Ok(())
    }
}

/// Load analyzer settings from a TOML file
///
/// Missing keys fall back to [`AnalyzerConfig::default`].
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Parse` - If TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalyzerConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AnalyzerConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
