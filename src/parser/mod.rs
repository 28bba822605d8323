//! Trace reading and line classification.
//!
//! This module handles:
//! - Reading raw trace bytes as lossily decoded lines
//! - Classifying lines into stack lifecycle events
//! - Defining the event types and the report schema

pub mod classifier;
pub mod event;
pub mod reader;
pub mod schema;

// Re-export main types
pub use classifier::{classify_line, extract_token};
pub use event::{BoundaryKind, RuleSite, StackId, TraceEvent};
pub use reader::{open_trace, TraceLines, TraceSource};
pub use schema::{RuleCount, RunSummary, StackStats, TokenCount, TraceReport};
