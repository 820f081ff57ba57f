//! Import order formatter.
//!
//! Makes one step of progress per run:
//!
//! 1. If two statements share a physical line, the first shared line is
//!    split in two.
//! 2. Otherwise the import on the reported line moves above the import
//!    before it.
//!
//! Only the topmost `import.ordering` violation of a file is applied, so a
//! badly ordered section needs repeated runs to converge.

use stylepatch_core::scanner::{first_shared_line, tokenize};
use stylepatch_core::utils::lines::char_slice;
use stylepatch_core::utils::reported_line;
use stylepatch_core::{FormatError, LineFormatter, Token, Violation};
use tracing::debug;

/// Reorders or splits import statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOrder;

impl ImportOrder {
    /// Creates the formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineFormatter for ImportOrder {
    fn name(&self) -> &'static str {
        "import-order"
    }

    /// Applies only to the last violation with this key in patch order,
    /// which is the topmost one in the file.
    ///
    /// `violation` must be an element of `violations`.
    fn can_apply(&self, violation: &Violation, violations: &[Violation]) -> bool {
        violations
            .iter()
            .rev()
            .find(|v| v.key == violation.key)
            .is_some_and(|last| std::ptr::eq(last, violation))
    }

    /// Splits the first shared line, or moves the reported import above the
    /// previous one. The first import after `package` is never moved.
    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        reported_line(lines, violation)?;
        let tokens = tokenize(lines)?;

        if let Some(second) = first_shared_line(&tokens) {
            debug!("Splitting line {}", tokens[second].start_line() + 1);
            return Ok(split(lines, &tokens[second - 1], &tokens[second]));
        }

        let line = violation.line_index();
        let Some(index) = tokens.iter().position(|t| t.spans_line(line)) else {
            return Ok(lines.to_vec());
        };
        let token = &tokens[index];
        if index == 0 || token.is_blank() || !token.is_import() {
            return Ok(lines.to_vec());
        }
        let previous = &tokens[index - 1];
        if !previous.is_import() {
            return Ok(lines.to_vec());
        }

        debug!(
            "Moving import at line {} above line {}",
            token.start_line() + 1,
            previous.start_line() + 1
        );
        Ok(move_before(lines, token, previous))
    }
}

/// Splits the line shared by `first` and `second` after `first`.
fn split(lines: &[String], first: &Token, second: &Token) -> Vec<String> {
    let index = second.start_line();
    let shared = &lines[index];
    let head = char_slice(shared, 0, first.end_column() + 1).trim_end();
    let tail = char_slice(shared, second.start_column(), usize::MAX).trim();

    let mut result = Vec::with_capacity(lines.len() + 1);
    result.extend_from_slice(&lines[..index]);
    result.push(head.to_string());
    result.push(tail.to_string());
    result.extend_from_slice(&lines[index + 1..]);
    result
}

/// Moves the lines of `token` in front of the first line of `previous`.
fn move_before(lines: &[String], token: &Token, previous: &Token) -> Vec<String> {
    let target = previous.start_line();
    let (start, end) = (token.start_line(), token.end_line());

    let mut result = Vec::with_capacity(lines.len());
    result.extend_from_slice(&lines[..target]);
    result.extend_from_slice(&lines[start..=end]);
    result.extend_from_slice(&lines[target..start]);
    result.extend_from_slice(&lines[end + 1..]);
    result
}
