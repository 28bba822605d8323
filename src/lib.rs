//! GLR Trace Analyzer
//!
//! Reconstructs the stack lifecycle of a generalized-LR parser from its
//! debug trace and reports how hard the parser had to fork: the highest
//! stack id allocated, the peak number of simultaneously live stacks, and
//! the tokens and grammar rules that triggered the most splits.
//!
//! This crate provides the core implementation for the `glr-trace` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! ./parser --trace input.js 2>&1 | glr-trace analyze
//! glr-trace analyze before.trace after.trace
//! ```
//!
//! Library use:
//!
//! ```ignore
//! use glr_trace_analyzer::aggregator::TraceAnalyzer;
//!
//! let mut analyzer = TraceAnalyzer::default();
//! for line in trace.lines() {
//!     analyzer.feed_line(line);
//! }
//! let report = analyzer.finish("trace.log");
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
