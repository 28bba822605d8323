use crate::utils::config::{DEFAULT_TOP_K, REPORT_SCHEMA_VERSION};

/// Display report schema information
pub fn display_schema(show_details: bool) {
    println!("GLR Trace Analyzer Report Schema");
    println!("Current Version: {}", REPORT_SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  source: string             - Trace path or '<stdin>'");
        println!("  generated_at: string       - ISO 8601 timestamp");
        println!("  cleanup_policy: string     - 'global' or 'per-run'");
        println!("  token_extraction: string   - 'positional' or 'named'");
        println!("  lines_read: number         - Lines consumed");
        println!("  events_applied: number     - Lines recognized as lifecycle events");
        println!("  totals: object             - Statistics over the whole trace");
        println!("    highest_stack_id: number - Highest stack id introduced by a split");
        println!("    peak_live_stacks: number - Most stacks alive at once");
        println!("    live_stacks_at_end: number");
        println!("    total_splits: number");
        println!("    token_attributed_splits: number");
        println!(
            "    top_tokens: array        - [{{token, splits}}], top {} by default",
            DEFAULT_TOP_K
        );
        println!("    top_rules: array?        - [{{rule, line, splits}}]");
        println!("  runs: array?               - Per-run statistics (per-run policy)");
        println!("    index: number            - 1-based run number");
        println!("    ...                      - Same fields as totals");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("GLR Trace Analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Stack lifecycle statistics from GLR parser debug traces.");
}
