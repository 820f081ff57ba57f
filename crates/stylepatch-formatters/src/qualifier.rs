//! Inserts a missing qualifier in front of the reported column.
//!
//! Handles `require.this.*` (inserts `this.`) and `final.parameter` (inserts
//! `final `). Nothing is inserted when the qualifier is already there, so a
//! violation replayed against a fixed line is a no-op.

use stylepatch_core::utils::lines::{char_slice, column_error};
use stylepatch_core::utils::{insert_at, reported_line, with_line};
use stylepatch_core::{EditSide, FormatError, LineFormatter, Violation};
use tracing::trace;

/// The text inserted by [`InsertQualifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// `this.` before a field access or method call.
    This,
    /// `final ` before a parameter declaration.
    Final,
}

impl Qualifier {
    /// The literal inserted text.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::This => "this.",
            Self::Final => "final ",
        }
    }
}

/// Inserts a [`Qualifier`] at the reported column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertQualifier {
    qualifier: Qualifier,
}

impl InsertQualifier {
    /// Creates a formatter inserting `qualifier`.
    #[must_use]
    pub fn new(qualifier: Qualifier) -> Self {
        Self { qualifier }
    }

    /// Formatter for `require.this.variable` and `require.this.method`.
    #[must_use]
    pub fn this() -> Self {
        Self::new(Qualifier::This)
    }

    /// Formatter for `final.parameter`.
    #[must_use]
    pub fn final_modifier() -> Self {
        Self::new(Qualifier::Final)
    }

    /// The inserted qualifier.
    #[must_use]
    pub fn qualifier(&self) -> Qualifier {
        self.qualifier
    }
}

impl LineFormatter for InsertQualifier {
    fn name(&self) -> &'static str {
        match self.qualifier {
            Qualifier::This => "require-this",
            Qualifier::Final => "final-parameter",
        }
    }

    fn edit_side(&self) -> EditSide {
        EditSide::Before
    }

    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        let line = reported_line(lines, violation)?;
        let column = violation.column_index();
        let text = self.qualifier.text();

        if char_slice(line, column, column + text.chars().count()) == text {
            trace!("{} already qualified", violation);
            return Ok(lines.to_vec());
        }

        let patched = insert_at(line, column, text).ok_or_else(|| column_error(violation, line))?;
        Ok(with_line(lines, violation.line_index(), patched))
    }
}
