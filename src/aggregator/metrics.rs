//! Rankings and summary statistics from lifecycle state.
//!
//! Split-triggering tokens and rules are the places where the grammar is
//! ambiguous enough to fork the parser. These are the primary targets when
//! tuning a GLR grammar.

use super::counters::SplitCounter;
use super::lifecycle::StackLifecycle;
use crate::parser::schema::{RuleCount, StackStats, TokenCount};
use crate::parser::RuleSite;
use log::debug;

/// Summarize lifecycle state into reportable statistics
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `state` - Accumulated lifecycle state
/// * `top_n` - Number of entries in each ranking
pub fn summarize(state: &StackLifecycle, top_n: usize) -> StackStats {
    debug!(
        "Summarizing {} splits over {} tokens and {} rules",
        state.total_splits(),
        state.token_splits().len(),
        state.rule_splits().len()
    );

    let top_rules = if state.attributes_rules() {
        Some(rank_rules(state.rule_splits(), top_n))
    } else {
        None
    };

    StackStats {
        highest_stack_id: state.highest_stack_id(),
        peak_live_stacks: state.peak_live(),
        live_stacks_at_end: state.live_count(),
        total_splits: state.total_splits(),
        token_attributed_splits: state.token_splits().total(),
        top_tokens: rank_tokens(state.token_splits(), top_n),
        top_rules,
    }
}

/// Top tokens by split count
pub fn rank_tokens(counter: &SplitCounter<String>, top_n: usize) -> Vec<TokenCount> {
    counter
        .top(top_n)
        .into_iter()
        .map(|(token, splits)| TokenCount { token, splits })
        .collect()
}

/// Top rule sites by split count
pub fn rank_rules(counter: &SplitCounter<RuleSite>, top_n: usize) -> Vec<RuleCount> {
    counter
        .top(top_n)
        .into_iter()
        .map(|(site, splits)| RuleCount {
            rule: site.rule,
            line: site.line,
            splits,
        })
        .collect()
}

/// Share of splits that could be tied to a lookahead token, in percent
pub fn token_coverage(stats: &StackStats) -> f64 {
    if stats.total_splits > 0 {
        (stats.token_attributed_splits as f64 / stats.total_splits as f64) * 100.0
    } else {
        0.0
    }
}
