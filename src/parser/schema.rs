//! Output JSON schema definitions for analysis reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::utils::config::{CleanupPolicy, TokenExtraction};
use serde::{Deserialize, Serialize};

/// Top-level report for one analyzed trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// File path or `<stdin>`
    pub source: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Run boundary handling used for this report
    pub cleanup_policy: CleanupPolicy,

    /// Token extraction strategy used for this report
    pub token_extraction: TokenExtraction,

    /// Lines consumed, recognized or not
    pub lines_read: u64,

    /// Lines that classified into a lifecycle event
    pub events_applied: u64,

    /// Cumulative statistics over the whole trace
    pub totals: StackStats,

    /// Per-run statistics (per-run policy only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<RunSummary>,
}

/// Statistics reconstructed from a stretch of trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackStats {
    /// Highest stack id introduced by a split
    pub highest_stack_id: u64,

    /// Largest number of simultaneously live stacks
    pub peak_live_stacks: usize,

    /// Live stacks when this stretch ended
    pub live_stacks_at_end: usize,

    /// All split events
    pub total_splits: u64,

    /// Splits that happened while a lookahead token was known
    pub token_attributed_splits: u64,

    /// Most frequent split-triggering tokens
    pub top_tokens: Vec<TokenCount>,

    /// Most frequent split-triggering rules (if attribution is enabled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_rules: Option<Vec<RuleCount>>,
}

/// A single parse run between boundaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// 1-based run number
    pub index: usize,

    #[serde(flatten)]
    pub stats: StackStats,
}

/// Split count for a lookahead token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub splits: u64,
}

/// Split count for a grammar rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCount {
    pub rule: u32,

    /// Line of the rule in the grammar source
    pub line: u32,

    pub splits: u64,
}
