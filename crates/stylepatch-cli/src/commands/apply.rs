//! Apply command implementation.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use stylepatch::{Config, ViolationReport};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line settings that win over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    /// `--line-ending`
    pub line_ending: Option<String>,
    /// `--parallel`
    pub parallel: bool,
    /// `--exclude`
    pub exclude: Vec<String>,
}

impl Overrides {
    fn apply_to(self, config: &mut Config) {
        if let Some(line_ending) = self.line_ending {
            config.patcher.line_ending = Some(line_ending);
        }
        if self.parallel {
            config.patcher.parallel = true;
        }
        config.patcher.exclude.extend(self.exclude);
    }
}

/// Runs the apply command.
pub fn run(
    report_path: Option<&Path>,
    project: &Path,
    format: OutputFormat,
    overrides: Overrides,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = load_config(source)?;
    overrides.apply_to(&mut config);

    let mut report = read_report(report_path)?;
    anchor_paths(&mut report, project);
    tracing::info!(
        "Loaded report with {} violations in {} files",
        report.violation_count(),
        report.files.len()
    );

    let result = match stylepatch::apply(&report, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(2);
        }
    };

    let unresolved = result.unresolved_keys();
    if !unresolved.is_empty() {
        tracing::warn!(
            "No formatter for {} violation key(s): {}",
            unresolved.len(),
            unresolved.join(", ")
        );
    }

    super::output::print(&result, format)?;

    // Exit with error code if any file failed
    if result.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        tracing::debug!("No config file found, using defaults");
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Resolves relative report paths against `project`.
fn anchor_paths(report: &mut ViolationReport, project: &Path) {
    if project == Path::new(".") {
        return;
    }
    for file in &mut report.files {
        if file.path.is_relative() {
            file.path = project.join(&file.path);
        }
    }
}

fn read_report(path: Option<&Path>) -> Result<ViolationReport> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read report from stdin")?;
            buffer
        }
    };
    parse_report(&content)
}

fn parse_report(content: &str) -> Result<ViolationReport> {
    serde_json::from_str(content).context("Invalid violation report")
}
