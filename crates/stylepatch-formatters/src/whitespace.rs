//! Inserts or removes a single space next to the reported token.
//!
//! The reported column points at the token itself:
//!
//! | Key | Edit |
//! |-----|------|
//! | `ws.notPreceded` | insert a space before the token |
//! | `ws.notFollowed` | insert a space after the token |
//! | `ws.preceded` | remove the space before the token |
//! | `ws.followed` | remove the space after the token |
//!
//! Every edit checks the neighbouring character first. Replaying a violation
//! against an already fixed line leaves it unchanged. Edits after the token
//! run before edits in front of it when both are reported at one column.

use crate::keys;
use stylepatch_core::utils::lines::column_error;
use stylepatch_core::utils::{char_at, insert_at, remove_at, reported_line, with_line};
use stylepatch_core::{EditSide, FormatError, LineFormatter, Violation};
use tracing::trace;

/// Which side of the token is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    /// Missing space before the token.
    NotPreceded,
    /// Missing space after the token.
    NotFollowed,
    /// Unwanted space before the token.
    Preceded,
    /// Unwanted space after the token.
    Followed,
}

impl Adjacency {
    /// Maps a `ws.*` key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            keys::WS_NOT_PRECEDED => Some(Self::NotPreceded),
            keys::WS_NOT_FOLLOWED => Some(Self::NotFollowed),
            keys::WS_PRECEDED => Some(Self::Preceded),
            keys::WS_FOLLOWED => Some(Self::Followed),
            _ => None,
        }
    }
}

/// Fixes one [`Adjacency`] defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhitespaceAround {
    adjacency: Adjacency,
}

impl WhitespaceAround {
    /// Creates a formatter for `adjacency`.
    #[must_use]
    pub fn new(adjacency: Adjacency) -> Self {
        Self { adjacency }
    }

    /// The fixed adjacency.
    #[must_use]
    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    fn patch(&self, line: &str, column: usize) -> Option<Option<String>> {
        let is_space = |c: Option<char>| c.is_some_and(char::is_whitespace);
        let patched = match self.adjacency {
            Adjacency::NotPreceded => {
                let before = column.checked_sub(1).and_then(|c| char_at(line, c));
                if is_space(before) || is_space(char_at(line, column)) {
                    None
                } else {
                    Some(insert_at(line, column, " ")?)
                }
            }
            Adjacency::NotFollowed => {
                // A space inserted in front of the token at the same column
                // moved it one to the right.
                let token = if is_space(char_at(line, column)) {
                    column + 1
                } else {
                    column
                };
                if is_space(char_at(line, token + 1)) {
                    None
                } else {
                    Some(insert_at(line, token + 1, " ")?)
                }
            }
            Adjacency::Preceded => match column.checked_sub(1) {
                Some(before) if char_at(line, before) == Some(' ') => {
                    Some(remove_at(line, before)?)
                }
                _ => None,
            },
            Adjacency::Followed => {
                if char_at(line, column + 1) == Some(' ') {
                    Some(remove_at(line, column + 1)?)
                } else {
                    None
                }
            }
        };
        Some(patched)
    }
}

impl LineFormatter for WhitespaceAround {
    fn name(&self) -> &'static str {
        match self.adjacency {
            Adjacency::NotPreceded => "whitespace-not-preceded",
            Adjacency::NotFollowed => "whitespace-not-followed",
            Adjacency::Preceded => "whitespace-preceded",
            Adjacency::Followed => "whitespace-followed",
        }
    }

    fn edit_side(&self) -> EditSide {
        match self.adjacency {
            Adjacency::NotFollowed | Adjacency::Followed => EditSide::After,
            Adjacency::NotPreceded | Adjacency::Preceded => EditSide::Before,
        }
    }

    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        let line = reported_line(lines, violation)?;
        let column = violation.column_index();
        if column >= line.chars().count() {
            return Err(column_error(violation, line));
        }

        match self
            .patch(line, column)
            .ok_or_else(|| column_error(violation, line))?
        {
            Some(patched) => Ok(with_line(lines, violation.line_index(), patched)),
            None => {
                trace!("{} already fixed", violation);
                Ok(lines.to_vec())
            }
        }
    }
}
