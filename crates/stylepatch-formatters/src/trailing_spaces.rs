//! Strips trailing whitespace from the reported line.

use stylepatch_core::utils::{reported_line, with_line};
use stylepatch_core::{FormatError, LineFormatter, Violation};

/// Fixes `Line has trailing spaces.` violations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrailingSpaces;

impl TrailingSpaces {
    /// Creates the formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineFormatter for TrailingSpaces {
    fn name(&self) -> &'static str {
        "trailing-spaces"
    }

    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        let line = reported_line(lines, violation)?;
        Ok(with_line(
            lines,
            violation.line_index(),
            line.trim_end().to_string(),
        ))
    }
}
