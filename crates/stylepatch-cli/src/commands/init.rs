//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# stylepatch configuration

[patcher]
# Line terminator for written files: "system", "lf", "crlf" or "cr"
# line_ending = "lf"

# Tab stop width used when expanding tab characters
tab_width = 4

# Patch files in parallel
parallel = false

# Glob patterns of files that are never patched
exclude = [
    "**/target/**",
    "**/generated/**",
]

# Formatters are keyed by the violation key they fix
# (see `stylepatch list-formatters`)

# [formatters."import.unused"]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("stylepatch.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created stylepatch.toml");
    println!("\nNext steps:");
    println!("  1. Edit stylepatch.toml to configure formatters");
    println!("  2. Run: stylepatch apply --report violations.json");

    Ok(())
}
