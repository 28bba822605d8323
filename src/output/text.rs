//! Human-readable summaries for the terminal.

use crate::aggregator::token_coverage;
use crate::parser::schema::{RuleCount, StackStats, TokenCount, TraceReport};
use colored::*;

const RULE_WIDTH: usize = 80;
const NAME_WIDTH: usize = 40;

/// Render the full text summary of a report
pub fn render_summary(report: &TraceReport) -> String {
    let mut out = String::new();

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("{} {}\n", "TRACE SUMMARY:".bold(), report.source));
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "Lines read: {} ({} lifecycle events)\n",
        report.lines_read, report.events_applied
    ));
    out.push_str(&render_stats(&report.totals));

    if !report.runs.is_empty() {
        out.push_str(&format!("\n{}\n", "Runs:".bold()));
        for run in &report.runs {
            out.push_str(&format!("  Run {}: {}\n", run.index, run_line(&run.stats)));
        }
    }

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

/// Render the statistics block shared by totals and saved reports
pub fn render_stats(stats: &StackStats) -> String {
    let mut out = String::new();

    out.push_str(&format!("Max stack id: {}\n", stats.highest_stack_id));
    out.push_str(&format!(
        "Peak concurrent stacks (approx): {}\n",
        stats.peak_live_stacks
    ));
    out.push_str(&format!("Live stacks at end: {}\n", stats.live_stacks_at_end));
    out.push_str(&format!(
        "Splits: {} ({} with a known token, {:.1}%)\n",
        stats.total_splits,
        stats.token_attributed_splits,
        token_coverage(stats)
    ));

    out.push_str(&format!("\n{}\n", "Top split tokens:".bold()));
    out.push_str(&render_tokens(&stats.top_tokens));

    if let Some(rules) = &stats.top_rules {
        out.push_str(&format!("\n{}\n", "Top split rules:".bold()));
        out.push_str(&render_rules(rules));
    }

    out
}

fn render_tokens(tokens: &[TokenCount]) -> String {
    if tokens.is_empty() {
        return "  (none)\n".to_string();
    }

    tokens
        .iter()
        .enumerate()
        .map(|(i, t)| {
            format!(
                "  {:>3}. {:<width$} {:>8}\n",
                i + 1,
                t.token,
                t.splits,
                width = NAME_WIDTH
            )
        })
        .collect()
}

fn render_rules(rules: &[RuleCount]) -> String {
    if rules.is_empty() {
        return "  (none)\n".to_string();
    }

    rules
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let site = format!("rule {} (line {})", r.rule, r.line);
            format!(
                "  {:>3}. {:<width$} {:>8}\n",
                i + 1,
                site,
                r.splits,
                width = NAME_WIDTH
            )
        })
        .collect()
}

fn run_line(stats: &StackStats) -> String {
    let lead = stats
        .top_tokens
        .first()
        .map(|t| format!(", top token {} ({})", t.token, t.splits))
        .unwrap_or_default();

    format!(
        "max stack {}, peak {}, splits {}{}",
        stats.highest_stack_id, stats.peak_live_stacks, stats.total_splits, lead
    )
}

// Token symbols come straight from the trace and can be arbitrarily long.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::analyze_lines;
    use crate::utils::config::AnalyzerConfig;

    #[test]
    fn test_render_summary_contents() {
        let report = analyze_lines(
            [
                "Next token is token IDENTIFIER (1.5: )",
                "Splitting off stack 1 from 0",
                "Stack 0 dies",
            ],
            &AnalyzerConfig::default(),
            "scenario.trace",
        );
        let text = render_summary(&report);

        assert!(text.contains("scenario.trace"));
        assert!(text.contains("Max stack id: 1"));
        assert!(text.contains("Peak concurrent stacks (approx): 2"));
        assert!(text.contains("IDENTIFIER"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn test_long_token_names_are_printed_in_full() {
        let long = format!("TOKEN_{}", "X".repeat(60));
        let announce = format!("Next token is token {} (1.1: )", long);
        let report = analyze_lines(
            [announce.as_str(), "Splitting off stack 1 from 0"],
            &AnalyzerConfig::default(),
            "long.trace",
        );
        let text = render_summary(&report);

        assert!(text.contains(&long));
        assert!(!text.contains("..."));
    }
}
