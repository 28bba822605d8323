//! Side-by-side comparison of two analyzed traces.
//!
//! Typical use is a trace of the same input captured before and after a
//! grammar change: did the change reduce forking, and on which tokens.

use crate::aggregator::{SplitCounter, TraceAnalysis};
use colored::*;
use serde::{Deserialize, Serialize};

/// Change of a single scalar between two traces
///
/// Stack ids span the whole `u64` range, so the change is kept as `i128`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountDelta {
    pub baseline: u64,
    pub target: u64,
    pub absolute_change: i128,
    pub percent_change: f64,
}

impl CountDelta {
    pub fn new(baseline: u64, target: u64) -> Self {
        Self {
            baseline,
            target,
            absolute_change: signed_change(baseline, target),
            percent_change: safe_percentage(baseline, target),
        }
    }
}

/// Split count change for one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenChange {
    pub token: String,
    pub baseline: u64,
    pub target: u64,
    pub delta: i128,
}

/// Comparison of the cumulative totals of two traces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceComparison {
    pub baseline_source: String,
    pub target_source: String,
    pub highest_stack_id: CountDelta,
    pub peak_live_stacks: CountDelta,
    pub total_splits: CountDelta,

    /// Every token seen in either trace, largest absolute change first
    pub token_changes: Vec<TokenChange>,
}

/// Compare two analyzed traces
///
/// Token deltas come from the full split tallies, so a token outside one
/// trace's top list still shows its real count there.
pub fn compare_traces(baseline: &TraceAnalysis, target: &TraceAnalysis) -> TraceComparison {
    let (before, after) = (&baseline.report.totals, &target.report.totals);

    TraceComparison {
        baseline_source: baseline.report.source.clone(),
        target_source: target.report.source.clone(),
        highest_stack_id: CountDelta::new(before.highest_stack_id, after.highest_stack_id),
        peak_live_stacks: CountDelta::new(
            before.peak_live_stacks as u64,
            after.peak_live_stacks as u64,
        ),
        total_splits: CountDelta::new(before.total_splits, after.total_splits),
        token_changes: compare_tokens(&baseline.token_splits, &target.token_splits),
    }
}

fn compare_tokens(
    baseline: &SplitCounter<String>,
    target: &SplitCounter<String>,
) -> Vec<TokenChange> {
    // Baseline ranking first, then tokens only the target has
    let mut names: Vec<String> = baseline
        .top(baseline.len())
        .into_iter()
        .map(|(token, _)| token)
        .collect();
    for (token, _) in target.top(target.len()) {
        if baseline.count(token.as_str()) == 0 {
            names.push(token);
        }
    }

    let mut changes: Vec<TokenChange> = names
        .into_iter()
        .map(|token| {
            let b = baseline.count(token.as_str());
            let t = target.count(token.as_str());
            TokenChange {
                token,
                baseline: b,
                target: t,
                delta: signed_change(b, t),
            }
        })
        .collect();

    // Stable sort keeps baseline ranking order among equal changes
    changes.sort_by(|a, b| b.delta.abs().cmp(&a.delta.abs()));
    changes
}

fn signed_change(baseline: u64, target: u64) -> i128 {
    i128::from(target) - i128::from(baseline)
}

/// Percentage change relative to `baseline`, 0 when the baseline is 0
fn safe_percentage(baseline: u64, target: u64) -> f64 {
    if baseline == 0 {
        0.0
    } else {
        ((target as f64 - baseline as f64) / baseline as f64) * 100.0
    }
}

/// Render a comparison for the terminal
pub fn render_comparison(cmp: &TraceComparison) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "Trace Comparison".bold()));
    out.push_str("---------------------------------------------------\n");
    out.push_str(&format!("Baseline: {}\n", cmp.baseline_source));
    out.push_str(&format!("Target:   {}\n", cmp.target_source));
    out.push_str("---------------------------------------------------\n");

    out.push_str(&render_delta("Max stack id", &cmp.highest_stack_id));
    out.push_str(&render_delta("Peak concurrent stacks", &cmp.peak_live_stacks));
    out.push_str(&render_delta("Splits", &cmp.total_splits));

    let changed: Vec<&TokenChange> = cmp.token_changes.iter().filter(|c| c.delta != 0).collect();
    if !changed.is_empty() {
        out.push_str("\nToken split changes:\n");
        for change in changed {
            out.push_str(&format!(
                "  {} {}: {} -> {} ({:+})\n",
                delta_symbol(change.delta),
                change.token,
                change.baseline,
                change.target,
                change.delta
            ));
        }
    }

    out
}

fn render_delta(label: &str, delta: &CountDelta) -> String {
    let line = format!(
        "{} {}: {} -> {} ({:+.2}%)",
        delta_symbol(delta.absolute_change),
        label,
        delta.baseline,
        delta.target,
        delta.percent_change
    );

    // More forking is the regression direction
    let line = match delta.absolute_change {
        c if c > 0 => line.red().to_string(),
        c if c < 0 => line.green().to_string(),
        _ => line,
    };

    format!("{}\n", line)
}

fn delta_symbol(change: i128) -> &'static str {
    if change > 0 {
        "📈"
    } else if change < 0 {
        "📉"
    } else {
        "➡️"
    }
}
