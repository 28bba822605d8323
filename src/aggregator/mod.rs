//! Aggregation of trace events into stack lifecycle statistics.
//!
//! This module transforms classified trace events into:
//! - A reconstructed live stack set
//! - Split counts per token and per grammar rule
//! - Peak and highest-id statistics per trace and per run

pub mod analyzer;
pub mod counters;
pub mod lifecycle;
pub mod metrics;

// Re-export main types and functions
pub use analyzer::{
    analyze_lines, analyze_reader, analyze_source, TraceAnalysis, TraceAnalyzer,
};
pub use counters::SplitCounter;
pub use lifecycle::StackLifecycle;
pub use metrics::{rank_rules, rank_tokens, summarize, token_coverage};
