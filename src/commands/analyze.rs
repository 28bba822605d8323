//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Resolves analyzer settings (config file, then CLI overrides)
//! 2. Streams each trace through the analyzer
//! 3. Prints a summary per trace, plus a comparison for two traces
//! 4. Writes the JSON report if requested

use super::models::AnalyzeArgs;
use crate::aggregator::{analyze_source, TraceAnalysis};
use crate::output::{compare_traces, render_comparison, render_summary, write_report};
use crate::parser::schema::TraceReport;
use crate::parser::TraceSource;
use crate::utils::config::{load_config, AnalyzerConfig, MAX_TOP_K, MAX_TRACE_FILES};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Arguments are expected to have passed `validate_args`.
///
/// # Errors
/// * Invalid config file
/// * Unreadable trace input
/// * Report write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    let analyses = run_analysis(&args)?;
    let reports: Vec<&TraceReport> = analyses.iter().map(|a| &a.report).collect();

    if args.json_stdout {
        let json = if reports.len() == 1 {
            serde_json::to_string_pretty(&reports[0])?
        } else {
            serde_json::to_string_pretty(&reports)?
        };
        println!("{}", json);
    } else {
        for report in &reports {
            println!("{}", render_summary(report));
        }

        if let [baseline, target] = analyses.as_slice() {
            println!("{}", render_comparison(&compare_traces(baseline, target)));
        }
    }

    if let (Some(path), [report]) = (&args.output_json, reports.as_slice()) {
        write_report(*report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Analyze every requested trace, in argument order
///
/// **Public** - the printing-free part of `execute_analyze`
pub fn run_analysis(args: &AnalyzeArgs) -> Result<Vec<TraceAnalysis>> {
    let config = resolve_config(args)?;
    debug!("Analyzer config: {:?}", config);

    trace_sources(args)
        .iter()
        .map(|source| {
            analyze_source(source, &config)
                .with_context(|| format!("Failed to analyze trace {}", source))
        })
        .collect()
}

/// Combine config file values with CLI overrides
///
/// **Public** - exposed for testing
pub fn resolve_config(args: &AnalyzeArgs) -> Result<AnalyzerConfig> {
    let mut config = match &args.config_file {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    if let Some(policy) = args.cleanup_policy {
        config.cleanup_policy = policy;
    }
    if let Some(extraction) = args.token_extraction {
        config.token_extraction = extraction;
    }
    if args.no_rules {
        config.attribute_rules = false;
    }

    config.validate()?;
    Ok(config)
}

fn trace_sources(args: &AnalyzeArgs) -> Vec<TraceSource> {
    if args.traces.is_empty() {
        vec![TraceSource::Stdin]
    } else {
        args.traces.iter().cloned().map(TraceSource::File).collect()
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.traces.len() > MAX_TRACE_FILES {
        anyhow::bail!(
            "At most {} trace files can be analyzed at once (got {})",
            MAX_TRACE_FILES,
            args.traces.len()
        );
    }

    if let Some(top_k) = args.top_k {
        if top_k == 0 {
            anyhow::bail!("top must be greater than 0");
        }

        if top_k > MAX_TOP_K {
            anyhow::bail!("top is too large (max {})", MAX_TOP_K);
        }
    }

    if args.output_json.is_some() && args.traces.len() > 1 {
        anyhow::bail!("--output can only be used with a single trace");
    }

    Ok(())
}
