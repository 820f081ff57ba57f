//! Removes import statements that should not be there.

use stylepatch_core::scanner::tokenize;
use stylepatch_core::utils::lines::char_slice;
use stylepatch_core::utils::reported_line;
use stylepatch_core::{FormatError, LineFormatter, Position, Token, Violation};
use tracing::debug;

/// Why an import is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redundancy {
    /// `import.unused`
    Unused,
    /// `import.duplicate`
    Duplicate,
    /// `import.lang`
    Lang,
}

/// Cuts the import statement covering the reported line.
///
/// When several statements share the line, the one containing the reported
/// column wins. Only that statement's text goes and the rest of the line is
/// kept. Lines left blank by the cut are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveImport {
    redundancy: Redundancy,
}

impl RemoveImport {
    /// Creates a formatter for `redundancy`.
    #[must_use]
    pub fn new(redundancy: Redundancy) -> Self {
        Self { redundancy }
    }

    /// Why imports are removed.
    #[must_use]
    pub fn redundancy(&self) -> Redundancy {
        self.redundancy
    }
}

impl LineFormatter for RemoveImport {
    fn name(&self) -> &'static str {
        match self.redundancy {
            Redundancy::Unused => "unused-import",
            Redundancy::Duplicate => "duplicate-import",
            Redundancy::Lang => "redundant-import",
        }
    }

    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        reported_line(lines, violation)?;
        let tokens = tokenize(lines)?;
        let line = violation.line_index();

        let position = Position::new(line, violation.column_index());
        let covering: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.is_import() && t.spans_line(line))
            .collect();
        let Some(token) = covering
            .iter()
            .find(|t| t.start() <= position && position <= t.end())
            .or_else(|| covering.first())
        else {
            debug!("No import statement on line {}", violation.line);
            return Ok(lines.to_vec());
        };

        let (start, end) = (token.start_line(), token.end_line());
        let head = char_slice(&lines[start], 0, token.start_column());
        let tail = char_slice(&lines[end], token.end_column() + 1, usize::MAX);
        let remaining = if head.trim().is_empty() {
            format!("{head}{}", tail.trim_start())
        } else {
            format!("{}{tail}", head.trim_end())
        };

        let mut result = Vec::with_capacity(lines.len());
        result.extend_from_slice(&lines[..start]);
        if !remaining.trim().is_empty() {
            result.push(remaining);
        }
        result.extend_from_slice(&lines[end + 1..]);
        Ok(result)
    }
}
