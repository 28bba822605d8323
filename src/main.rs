//! GLR Trace Analyzer CLI
//!
//! Reads GLR parser debug traces from files or a pipe and reports stack
//! split statistics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use glr_trace_analyzer::commands::{
    display_schema, display_version, execute_analyze, validate_args, AnalyzeArgs,
};
use glr_trace_analyzer::utils::config::{CleanupPolicy, TokenExtraction};

/// GLR Trace Analyzer - stack lifecycle statistics for GLR parser traces
#[derive(Parser, Debug)]
#[command(name = "glr-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one or two traces (standard input when no path is given)
    Analyze {
        /// Trace files to analyze
        traces: Vec<PathBuf>,

        /// Number of entries in each ranking [default: 10]
        #[arg(long)]
        top: Option<usize>,

        /// Run boundary handling: global or per-run
        #[arg(long)]
        cleanup: Option<CleanupPolicy>,

        /// Token extraction: positional or named
        #[arg(long)]
        token_field: Option<TokenExtraction>,

        /// Do not attribute splits to grammar rules
        #[arg(long)]
        no_rules: bool,

        /// Analyzer config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output path for the JSON report (single trace only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the JSON report to stdout instead of the text summary
        #[arg(long)]
        json: bool,
    },

    /// Display report schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            traces,
            top,
            cleanup,
            token_field,
            no_rules,
            config,
            output,
            json,
        } => {
            let args = AnalyzeArgs {
                traces,
                top_k: top,
                cleanup_policy: cleanup,
                token_extraction: token_field,
                no_rules,
                config_file: config,
                output_json: output,
                json_stdout: json,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
