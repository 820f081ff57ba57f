//! stylepatch CLI tool.
//!
//! Usage:
//! ```bash
//! stylepatch apply [OPTIONS] [--report FILE]
//! stylepatch list-formatters
//! stylepatch init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Fixes mechanical style violations reported by a style analyzer
#[derive(Parser)]
#[command(name = "stylepatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "STYLEPATCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a violation report to the files it names
    Apply {
        /// JSON violation report (default: read from stdin)
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Project directory: looked up for the configuration file, and
        /// relative report paths are resolved against it
        #[arg(long, default_value = ".")]
        project: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Line terminator for written files: system, lf, crlf or cr
        #[arg(long)]
        line_ending: Option<String>,

        /// Patch files in parallel
        #[arg(long)]
        parallel: bool,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List violation keys with a built-in formatter
    ListFormatters,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for patch results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-file compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Apply {
            report,
            project,
            format,
            line_ending,
            parallel,
            exclude,
        } => {
            let source = config_resolver::resolve(&project, cli.config.as_deref());
            let overrides = commands::apply::Overrides {
                line_ending,
                parallel,
                exclude,
            };
            commands::apply::run(report.as_deref(), &project, format, overrides, &source)
        }
        Commands::ListFormatters => {
            commands::list_formatters::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
