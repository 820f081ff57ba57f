//! Blank-line fixes between import groups.
//!
//! Both formatters step aside while the file still has `import.ordering`
//! violations: moving imports changes which blank lines are needed.

use crate::keys;
use stylepatch_core::utils::reported_line;
use stylepatch_core::{FormatError, LineFormatter, Violation};

fn no_ordering_violations(violations: &[Violation]) -> bool {
    violations.iter().all(|v| v.key != keys::IMPORT_ORDERING)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Removes a blank line inside an import group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportGroups;

impl ImportGroups {
    /// Creates the formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineFormatter for ImportGroups {
    fn name(&self) -> &'static str {
        "import-groups"
    }

    fn can_apply(&self, _violation: &Violation, violations: &[Violation]) -> bool {
        no_ordering_violations(violations)
    }

    /// Deletes the line above the reported import if it is blank.
    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        reported_line(lines, violation)?;
        let mut result = lines.to_vec();
        if let Some(above) = violation.line.checked_sub(2) {
            if is_blank(&lines[above]) {
                result.remove(above);
            }
        }
        Ok(result)
    }
}

/// Inserts a missing blank line between import groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSeparation;

impl ImportSeparation {
    /// Creates the formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineFormatter for ImportSeparation {
    fn name(&self) -> &'static str {
        "import-separation"
    }

    fn can_apply(&self, _violation: &Violation, violations: &[Violation]) -> bool {
        no_ordering_violations(violations)
    }

    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        reported_line(lines, violation)?;
        let mut result = lines.to_vec();
        if let Some(above) = violation.line.checked_sub(2) {
            if !is_blank(&lines[above]) {
                result.insert(violation.line_index(), String::new());
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn removes_blank_line_above() {
        let buffer = lines(&["import a.A;", "", "import a.B;", "class X {}"]);
        let v = Violation::new(3, 1, keys::IMPORT_GROUPS_SEPARATED_INTERNALLY, "");

        let result = ImportGroups.format(&v, &buffer).unwrap();
        assert_eq!(result, lines(&["import a.A;", "import a.B;", "class X {}"]));
    }

    #[test]
    fn keeps_non_blank_line_above() {
        let buffer = lines(&["import a.A;", "import a.B;"]);
        let v = Violation::new(2, 1, keys::IMPORT_GROUPS_SEPARATED_INTERNALLY, "");
        assert_eq!(ImportGroups.format(&v, &buffer).unwrap(), buffer);

        let first = Violation::new(1, 1, keys::IMPORT_GROUPS_SEPARATED_INTERNALLY, "");
        assert_eq!(ImportGroups.format(&first, &buffer).unwrap(), buffer);
    }

    #[test]
    fn inserts_separator_once() {
        let buffer = lines(&["import java.util.List;", "import org.junit.Test;"]);
        let v = Violation::new(2, 1, keys::IMPORT_SEPARATION, "");

        let once = ImportSeparation.format(&v, &buffer).unwrap();
        assert_eq!(once, lines(&["import java.util.List;", "", "import org.junit.Test;"]));

        let shifted = Violation::new(3, 1, keys::IMPORT_SEPARATION, "");
        assert_eq!(ImportSeparation.format(&shifted, &once).unwrap(), once);
    }

    #[test]
    fn ordering_violations_take_precedence() {
        let groups = Violation::new(3, 1, keys::IMPORT_GROUPS_SEPARATED_INTERNALLY, "");
        let clean = vec![groups.clone(), Violation::new(1, 1, keys::IMPORT_UNUSED, "")];
        let ordering = vec![groups.clone(), Violation::new(5, 1, keys::IMPORT_ORDERING, "")];

        assert!(ImportGroups.can_apply(&groups, &clean));
        assert!(!ImportGroups.can_apply(&groups, &ordering));
        assert!(ImportSeparation.can_apply(&groups, &clean));
        assert!(!ImportSeparation.can_apply(&groups, &ordering));
    }

    #[test]
    fn line_out_of_range_is_an_error() {
        let v = Violation::new(4, 1, keys::IMPORT_SEPARATION, "");
        assert_eq!(
            ImportSeparation.format(&v, &lines(&["a"])),
            Err(FormatError::LineOutOfRange { line: 4, len: 1 })
        );
    }
}
