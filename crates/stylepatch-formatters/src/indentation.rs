//! Moves a wrongly indented line one space toward its expected level.
//!
//! The analyzer only reports the levels inside its human-readable message,
//! e.g. `'method def' child has incorrect indentation level 6, expected level
//! should be 4.`, so the message is parsed by [`expected_indentation`]. The
//! fix is a single step per run; a line that is off by several columns
//! converges over repeated runs.

use std::cmp::Ordering;

use stylepatch_core::utils::lines::column_error;
use stylepatch_core::utils::{insert_at, remove_at, reported_line, with_line};
use stylepatch_core::{EditSide, FormatError, LineFormatter, Violation};

/// Extracts every decimal integer from an indentation message, in order.
///
/// # Errors
///
/// Returns [`FormatError::MessageFormat`] if an integer does not fit `usize`.
pub fn parse_indentation_levels(message: &str) -> Result<Vec<usize>, FormatError> {
    message
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| {
            run.parse().map_err(|_| FormatError::MessageFormat {
                message: message.to_string(),
                reason: "indentation level out of range",
            })
        })
        .collect()
}

/// Derives the expected indentation from the message and the actual level.
///
/// The message must contain the actual level plus at least one other
/// integer. With several alternatives the one closest to `actual` wins.
///
/// # Errors
///
/// Returns [`FormatError::MessageFormat`] if the message breaks that shape.
pub fn expected_indentation(message: &str, actual: usize) -> Result<usize, FormatError> {
    let levels = parse_indentation_levels(message)?;
    let contract = |reason| FormatError::MessageFormat {
        message: message.to_string(),
        reason,
    };

    if levels.len() < 2 {
        return Err(contract("expected two indentation levels"));
    }
    let Some(position) = levels.iter().position(|&level| level == actual) else {
        return Err(contract("no level matches the actual indentation"));
    };

    let mut candidates = levels
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != position)
        .map(|(_, &level)| level);

    if levels.len() == 2 {
        return candidates
            .next()
            .ok_or_else(|| contract("expected two indentation levels"));
    }
    candidates
        .filter(|&level| level != actual)
        .min_by_key(|&level| level.abs_diff(actual))
        .ok_or_else(|| contract("no expected level differs from the actual indentation"))
}

/// Fixes `indentation.*` violations one space at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indentation;

impl Indentation {
    /// Creates the formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineFormatter for Indentation {
    fn name(&self) -> &'static str {
        "indentation"
    }

    fn edit_side(&self) -> EditSide {
        EditSide::Leading
    }

    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        let line = reported_line(lines, violation)?;
        let actual = violation.column_index();
        if actual > line.chars().count() {
            return Err(column_error(violation, line));
        }
        let expected = expected_indentation(&violation.message, actual)?;

        let patched = match actual.cmp(&expected) {
            Ordering::Less => insert_at(line, actual, " "),
            Ordering::Greater => remove_at(line, actual - 1),
            Ordering::Equal => return Ok(lines.to_vec()),
        };
        let patched = patched.ok_or_else(|| column_error(violation, line))?;
        Ok(with_line(lines, violation.line_index(), patched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(column: usize, message: &str) -> Violation {
        Violation::new(1, column, "indentation.error", message)
    }

    #[test]
    fn parses_all_integers() {
        assert_eq!(
            parse_indentation_levels("'if' has incorrect indentation level 6, expected level should be 4.").unwrap(),
            vec![6, 4]
        );
        assert_eq!(
            parse_indentation_levels("level 12, expected one of: 8, 16.").unwrap(),
            vec![12, 8, 16]
        );
        assert!(parse_indentation_levels("no levels").unwrap().is_empty());
    }

    #[test]
    fn expected_is_the_other_integer_in_either_order() {
        assert_eq!(expected_indentation("level 6, expected 4", 6).unwrap(), 4);
        assert_eq!(expected_indentation("expected 4, got 6", 6).unwrap(), 4);
        assert_eq!(expected_indentation("level 4, expected 4", 4).unwrap(), 4);
    }

    #[test]
    fn multi_picks_closest_alternative() {
        let message = "'member def' has incorrect indentation level 5, expected level should be one of the following: 4, 8.";
        assert_eq!(expected_indentation(message, 5).unwrap(), 4);
        assert_eq!(expected_indentation("level 7, one of: 4, 8", 7).unwrap(), 8);
    }

    #[test]
    fn broken_message_contract_fails() {
        for (message, actual) in [("level 6", 6), ("", 0), ("level 6, expected 4", 5)] {
            assert!(
                matches!(
                    expected_indentation(message, actual),
                    Err(FormatError::MessageFormat { .. })
                ),
                "{message:?}"
            );
        }
    }

    #[test]
    fn adds_one_space_when_too_shallow() {
        let lines = vec!["  return;".to_string()];
        let result = Indentation
            .format(&violation(3, "level 2, expected level should be 4."), &lines)
            .unwrap();
        assert_eq!(result, vec!["   return;"]);
    }

    #[test]
    fn removes_one_space_when_too_deep() {
        let lines = vec!["      return;".to_string()];
        let result = Indentation
            .format(&violation(7, "level 6, expected level should be 4."), &lines)
            .unwrap();
        assert_eq!(result, vec!["     return;"]);
    }

    #[test]
    fn converges_over_repeated_runs() {
        let mut lines = vec!["      x();".to_string()];
        for _ in 0..2 {
            let actual = lines[0].len() - lines[0].trim_start().len();
            let message = format!("level {actual}, expected level should be 4.");
            lines = Indentation.format(&violation(actual + 1, &message), &lines).unwrap();
        }
        assert_eq!(lines, vec!["    x();"]);
    }

    #[test]
    fn matching_levels_leave_line_unchanged() {
        let lines = vec!["    x();".to_string()];
        let result = Indentation
            .format(&violation(5, "level 4, expected 4"), &lines)
            .unwrap();
        assert_eq!(result, lines);
    }

    #[test]
    fn message_errors_propagate() {
        let lines = vec!["    x();".to_string()];
        let result = Indentation.format(&violation(5, "wrong indentation"), &lines);
        assert!(matches!(result, Err(FormatError::MessageFormat { .. })));
    }
}
