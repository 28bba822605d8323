//! Output writers for analysis reports.
//!
//! This module handles presenting reports in various formats:
//! - JSON reports (written to disk or stdout)
//! - Text summaries
//! - Two-trace comparisons

pub mod compare;
pub mod json;
pub mod text;

// Re-export main functions
pub use compare::{compare_traces, render_comparison, CountDelta, TokenChange, TraceComparison};
pub use json::{read_report, report_to_string, write_report};
pub use text::{render_stats, render_summary};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
