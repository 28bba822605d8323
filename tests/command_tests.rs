use glr_trace_analyzer::commands::{run_analysis, validate_args, AnalyzeArgs};
use glr_trace_analyzer::utils::config::{CleanupPolicy, TokenExtraction};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn trace_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_validate_args_valid() {
    let args = AnalyzeArgs {
        traces: vec![PathBuf::from("a.trace"), PathBuf::from("b.trace")],
        top_k: Some(5),
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_three_traces() {
    let args = AnalyzeArgs {
        traces: vec![
            PathBuf::from("a.trace"),
            PathBuf::from("b.trace"),
            PathBuf::from("c.trace"),
        ],
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_top_zero() {
    let args = AnalyzeArgs {
        top_k: Some(0),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_run_analysis_two_traces_independently() {
    let first = trace_file(&[
        "Next token is token IDENTIFIER (1.5: )",
        "Splitting off stack 1 from 0",
        "Splitting off stack 2 from 0",
    ]);
    let second = trace_file(&["Splitting off stack 7 from 0"]);

    let args = AnalyzeArgs {
        traces: vec![first.path().to_path_buf(), second.path().to_path_buf()],
        ..Default::default()
    };
    let analyses = run_analysis(&args).unwrap();

    assert_eq!(analyses.len(), 2);
    assert_eq!(analyses[0].report.totals.highest_stack_id, 2);
    assert_eq!(analyses[0].report.totals.peak_live_stacks, 3);
    assert_eq!(analyses[0].report.totals.top_tokens[0].token, "IDENTIFIER");
    assert_eq!(analyses[1].report.totals.highest_stack_id, 7);
    assert!(analyses[1].report.totals.top_tokens.is_empty());
    assert_eq!(analyses[1].report.source, second.path().display().to_string());
}

#[test]
fn test_run_analysis_applies_overrides() {
    let trace = trace_file(&[
        "Next token is token ID(3.1)",
        "Splitting off stack 1 from 0",
        "[FAIL] broken.js",
        "Splitting off stack 2 from 0",
    ]);

    let args = AnalyzeArgs {
        traces: vec![trace.path().to_path_buf()],
        cleanup_policy: Some(CleanupPolicy::PerRun),
        token_extraction: Some(TokenExtraction::Named),
        no_rules: true,
        ..Default::default()
    };
    let analyses = run_analysis(&args).unwrap();
    let report = &analyses[0].report;

    assert_eq!(report.runs.len(), 2);
    assert_eq!(report.totals.top_tokens[0].token, "ID");
    assert!(report.totals.top_rules.is_none());
}

#[test]
fn test_run_analysis_missing_file_fails() {
    let args = AnalyzeArgs {
        traces: vec![PathBuf::from("/no/such/dir/parse.trace")],
        ..Default::default()
    };

    let err = run_analysis(&args).unwrap_err();
    assert!(format!("{:#}", err).contains("parse.trace"));
}

#[test]
fn test_run_analysis_bad_config_fails() {
    let config = trace_file(&["top_k = \"ten\""]);
    let trace = trace_file(&["Splitting off stack 1 from 0"]);

    let args = AnalyzeArgs {
        traces: vec![trace.path().to_path_buf()],
        config_file: Some(config.path().to_path_buf()),
        ..Default::default()
    };

    assert!(run_analysis(&args).is_err());
}
