//! Formatter traits for fixing individual violations.

use crate::ordering::EditSide;
use crate::scanner::ScanError;
use crate::types::Violation;
use thiserror::Error;

/// Errors a formatter can raise while rewriting a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The violation points past the end of the buffer.
    #[error("line {line} is out of range (buffer has {len} lines)")]
    LineOutOfRange {
        /// Reported line (1-indexed).
        line: usize,
        /// Number of lines in the buffer.
        len: usize,
    },

    /// The violation points past the end of its line.
    #[error("column {column} is out of range on line {line} ({len} characters)")]
    ColumnOutOfRange {
        /// Reported line (1-indexed).
        line: usize,
        /// Reported column (1-indexed).
        column: usize,
        /// Number of characters on the line.
        len: usize,
    },

    /// The import section could not be tokenized.
    #[error("malformed source: {0}")]
    Scan(#[from] ScanError),

    /// The violation message does not follow the expected format.
    #[error("unexpected message format ({reason}): {message:?}")]
    MessageFormat {
        /// The message that failed to parse.
        message: String,
        /// What was expected.
        reason: &'static str,
    },
}

/// Rewrites a line buffer to fix one violation.
///
/// Implementations must not rely on the caller's buffer being reused: the
/// input is borrowed and a fresh buffer is returned.
///
/// # Example
///
/// ```ignore
/// use stylepatch_core::{FormatError, LineFormatter, Violation};
///
/// pub struct StripTrailing;
///
/// impl LineFormatter for StripTrailing {
///     fn name(&self) -> &'static str { "strip-trailing" }
///
///     fn format(&self, v: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
///         let mut lines = lines.to_vec();
///         let line = &mut lines[v.line_index()];
///         line.truncate(line.trim_end().len());
///         Ok(lines)
///     }
/// }
/// ```
pub trait LineFormatter {
    /// Returns the kebab-case name of this formatter (e.g., "import-order").
    fn name(&self) -> &'static str;

    /// Decides whether this violation should be fixed in the current run.
    ///
    /// `violations` is the full, patch-ordered list for the file and contains
    /// `violation` itself.
    fn can_apply(&self, violation: &Violation, violations: &[Violation]) -> bool {
        let _ = (violation, violations);
        true
    }

    /// Where this formatter edits relative to the reported column.
    fn edit_side(&self) -> EditSide {
        EditSide::At
    }

    /// Returns the buffer with the violation fixed.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the violation does not fit the buffer or
    /// its message cannot be interpreted.
    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError>;
}

/// Maps violation keys to formatters.
///
/// A key without a formatter resolves to `None`; the violation is then left
/// untouched.
pub trait FormatterRegistry: Send + Sync {
    /// The formatter type handed out by this registry.
    type Formatter: LineFormatter;

    /// Looks up the formatter for a violation key.
    fn resolve(&self, key: &str) -> Option<Self::Formatter>;
}
