//! Line-at-a-time trace analyzer and its drivers.
//!
//! [`TraceAnalyzer::feed_line`] is the only transition entry point. The
//! drivers below just decide where lines come from: an in-memory sequence
//! ([`analyze_lines`]) or an open stream such as a pipe from a running
//! parser ([`analyze_reader`]). Memory use is bounded by the number of
//! distinct stack ids, tokens and rule sites seen, never by trace length.

use super::counters::SplitCounter;
use super::lifecycle::StackLifecycle;
use super::metrics::summarize;
use crate::parser::schema::{RunSummary, StackStats, TraceReport};
use crate::parser::{classify_line, TraceEvent, TraceLines, TraceSource};
use crate::utils::config::{AnalyzerConfig, CleanupPolicy, REPORT_SCHEMA_VERSION};
use crate::utils::error::TraceError;
use chrono::Utc;
use log::{debug, info, trace};
use std::io::BufRead;
use std::time::Instant;

/// A finished report plus the full token tally behind its top list
#[derive(Debug, Clone)]
pub struct TraceAnalysis {
    pub report: TraceReport,

    /// Split counts for every token seen, not only the ranked ones
    pub token_splits: SplitCounter<String>,
}

/// Streaming accumulator over one trace
#[derive(Debug, Clone)]
pub struct TraceAnalyzer {
    config: AnalyzerConfig,

    /// Cumulative state; boundaries only clear its live set
    totals: StackLifecycle,

    /// Current run under the per-run policy
    run: Option<StackLifecycle>,

    closed_runs: Vec<RunSummary>,
    lines_read: u64,
    events_applied: u64,
}

impl TraceAnalyzer {
    /// Create an analyzer positioned before the first line
    pub fn new(config: AnalyzerConfig) -> Self {
        let run = match config.cleanup_policy {
            CleanupPolicy::Global => None,
            CleanupPolicy::PerRun => Some(StackLifecycle::new(config.attribute_rules)),
        };

        Self {
            totals: StackLifecycle::new(config.attribute_rules),
            run,
            closed_runs: Vec::new(),
            lines_read: 0,
            events_applied: 0,
            config,
        }
    }

    /// Classify one raw line and apply it
    ///
    /// Returns the recognized event, or `None` if the line was skipped.
    pub fn feed_line(&mut self, line: &str) -> Option<TraceEvent> {
        self.lines_read += 1;

        let event = classify_line(line, self.config.token_extraction)?;
        self.apply(&event);
        Some(event)
    }

    /// Feed every line of a reader until EOF
    ///
    /// # Errors
    /// * `TraceError::Read` - The stream failed mid-read
    pub fn feed_reader<R: BufRead>(&mut self, reader: R) -> Result<(), TraceError> {
        for line in TraceLines::new(reader) {
            self.feed_line(&line?);
        }
        Ok(())
    }

    /// Apply an already classified event
    pub fn apply(&mut self, event: &TraceEvent) {
        self.events_applied += 1;
        trace!("line {}: {} {:?}", self.lines_read, event.kind(), event);

        self.totals.apply(event);

        if let Some(run) = self.run.as_mut() {
            run.apply(event);

            if let TraceEvent::Boundary(kind) = event {
                debug!("Run boundary {:?} at line {}", kind, self.lines_read);
                self.close_run();
            }
        }
    }

    /// Move the current run into the closed list if it saw anything
    fn close_run(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };

        if !run.is_active() {
            return;
        }

        let index = self.closed_runs.len() + 1;
        let stats = summarize(run, self.config.top_k);
        debug!(
            "Closing run {}: highest stack {}, peak {}",
            index, stats.highest_stack_id, stats.peak_live_stacks
        );

        self.closed_runs.push(RunSummary { index, stats });
        *run = StackLifecycle::after_boundary(self.config.attribute_rules);
    }

    /// Cumulative state so far
    pub fn totals(&self) -> &StackLifecycle {
        &self.totals
    }

    /// Statistics as of now, without ending the analysis
    pub fn snapshot(&self) -> StackStats {
        summarize(&self.totals, self.config.top_k)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    /// End of input: close the last run and build the report
    pub fn finish(mut self, source: impl Into<String>) -> TraceReport {
        self.close_run();

        TraceReport {
            version: REPORT_SCHEMA_VERSION.to_string(),
            source: source.into(),
            generated_at: Utc::now().to_rfc3339(),
            cleanup_policy: self.config.cleanup_policy,
            token_extraction: self.config.token_extraction,
            lines_read: self.lines_read,
            events_applied: self.events_applied,
            totals: summarize(&self.totals, self.config.top_k),
            runs: self.closed_runs,
        }
    }

    /// End of input, keeping the full token tally next to the report
    pub fn into_analysis(self, source: impl Into<String>) -> TraceAnalysis {
        let token_splits = self.totals.token_splits().clone();
        TraceAnalysis {
            report: self.finish(source),
            token_splits,
        }
    }
}

impl Default for TraceAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// Analyze an in-memory sequence of lines
///
/// **Public** - bounded driver
pub fn analyze_lines<I, S>(lines: I, config: &AnalyzerConfig, source: &str) -> TraceReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut analyzer = TraceAnalyzer::new(config.clone());
    for line in lines {
        analyzer.feed_line(line.as_ref());
    }
    analyzer.finish(source)
}

/// Analyze lines as they arrive from a reader
///
/// **Public** - streaming driver
///
/// # Errors
/// * `TraceError::Read` - The stream failed mid-read
pub fn analyze_reader<R: BufRead>(
    reader: R,
    config: &AnalyzerConfig,
    source: &str,
) -> Result<TraceReport, TraceError> {
    let mut analyzer = TraceAnalyzer::new(config.clone());
    analyzer.feed_reader(reader)?;
    Ok(analyzer.finish(source))
}

/// Open a trace source and analyze it to the end
///
/// **Public** - used by commands
///
/// # Errors
/// * `TraceError::Open` - Source cannot be opened
/// * `TraceError::Read` - Source failed mid-read
pub fn analyze_source(
    source: &TraceSource,
    config: &AnalyzerConfig,
) -> Result<TraceAnalysis, TraceError> {
    let start_time = Instant::now();
    info!("Analyzing trace: {}", source);

    let mut analyzer = TraceAnalyzer::new(config.clone());
    analyzer.feed_reader(source.open()?)?;
    let analysis = analyzer.into_analysis(source.to_string());

    info!(
        "Analyzed {} lines ({} events) in {:.2}s",
        analysis.report.lines_read,
        analysis.report.events_applied,
        start_time.elapsed().as_secs_f64()
    );

    Ok(analysis)
}
