//! List formatters command implementation.

use stylepatch::formatters::{BuiltinRegistry, BUILTIN_KEYS};
use stylepatch::{FormatterRegistry, LineFormatter};

/// Runs the list-formatters command.
pub fn run() {
    let registry = BuiltinRegistry::new();

    println!("Available formatters:\n");
    println!("{:<40} Formatter", "Violation key");
    println!("{}", "-".repeat(64));

    for key in BUILTIN_KEYS {
        if let Some(formatter) = registry.resolve(key) {
            println!("{:<40} {}", key, formatter.name());
        }
    }

    println!("\nViolations with any other key are left as reported.");
    println!("\nDisable a formatter in stylepatch.toml, e.g.:");
    println!("  [formatters.\"import.unused\"]");
    println!("  enabled = false");
}
