//! Shared output formatting for patch results.

use anyhow::Result;
use stylepatch::PatchResult;

use crate::OutputFormat;

/// Print patch results in the specified format.
pub fn print(result: &PatchResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &PatchResult) {
    for outcome in &result.outcomes {
        let status = if outcome.changed {
            "\x1b[32mpatched\x1b[0m"
        } else {
            "\x1b[34munchanged\x1b[0m"
        };
        println!("{} {}", status, outcome.path.display());
        println!(
            "  {} fixed, {} deferred, {} unresolved",
            outcome.applied,
            outcome.gated,
            outcome.unresolved.len()
        );
    }

    for failure in &result.failures {
        println!("\x1b[31mfailed\x1b[0m {}", failure.path.display());
        println!("  {}", failure.message);
    }

    let summary_color = if result.has_failures() {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };

    println!(
        "\n{}Applied {} fix(es), changed {} file(s), {} failed, {} skipped\x1b[0m",
        summary_color,
        result.applied_count(),
        result.changed_count(),
        result.failures.len(),
        result.skipped
    );

    if result.outcomes.iter().any(|o| o.gated > 0) {
        println!("Some fixes were deferred; run the analyzer and stylepatch again.");
    }
}

fn print_json(result: &PatchResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &PatchResult) {
    for outcome in &result.outcomes {
        println!(
            "{}: applied={} deferred={} unresolved={} changed={}",
            outcome.path.display(),
            outcome.applied,
            outcome.gated,
            outcome.unresolved.len(),
            outcome.changed,
        );
    }
    for failure in &result.failures {
        println!("{}: error {}", failure.path.display(), failure.message);
    }
}
