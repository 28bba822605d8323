use crate::utils::config::{CleanupPolicy, TokenExtraction};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
///
/// Every `Option` left as `None` falls back to the config file, then to
/// the built-in defaults.
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Trace files; empty means standard input
    pub traces: Vec<PathBuf>,

    /// Number of entries in each ranking
    pub top_k: Option<usize>,

    /// Run boundary handling
    pub cleanup_policy: Option<CleanupPolicy>,

    /// Token symbol extraction strategy
    pub token_extraction: Option<TokenExtraction>,

    /// Disable rule attribution
    pub no_rules: bool,

    /// Optional analyzer config file (TOML)
    pub config_file: Option<PathBuf>,

    /// Path to write the JSON report (single trace only)
    pub output_json: Option<PathBuf>,

    /// Print JSON to stdout instead of the text summary
    pub json_stdout: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            traces: Vec::new(),
            top_k: None,
            cleanup_policy: None,
            token_extraction: None,
            no_rules: false,
            config_file: None,
            output_json: None,
            json_stdout: false,
        }
    }
}
