//! Expands tab characters to spaces.
//!
//! Each tab becomes enough spaces to reach the next tab stop. Characters
//! before the reported column are left alone but still count toward the
//! visual column, so stops stay aligned.

use stylepatch_core::utils::lines::column_error;
use stylepatch_core::utils::reported_line;
use stylepatch_core::{FormatError, LineFormatter, Violation};

/// Tab stop width used when none is configured.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// How much of the buffer a violation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabScope {
    /// The reported line, from the reported column (`containsTab`).
    Line,
    /// From the reported position to the end of the file (`file.containsTab`).
    File,
}

/// Replaces tabs with spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandTabs {
    scope: TabScope,
    tab_width: usize,
}

impl ExpandTabs {
    /// Creates a formatter with the default tab width.
    #[must_use]
    pub fn new(scope: TabScope) -> Self {
        Self {
            scope,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    /// Sets the tab stop width (at least 1).
    #[must_use]
    pub fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width.max(1);
        self
    }

    /// The covered scope.
    #[must_use]
    pub fn scope(&self) -> TabScope {
        self.scope
    }
}

/// Expands tabs at or after character `from`.
#[must_use]
pub fn expand_tabs(line: &str, from: usize, width: usize) -> String {
    let width = width.max(1);
    let mut result = String::with_capacity(line.len());
    let mut visual = 0;
    for (index, c) in line.chars().enumerate() {
        if c == '\t' {
            let pad = width - visual % width;
            if index >= from {
                result.push_str(&" ".repeat(pad));
            } else {
                result.push('\t');
            }
            visual += pad;
        } else {
            result.push(c);
            visual += 1;
        }
    }
    result
}

impl LineFormatter for ExpandTabs {
    fn name(&self) -> &'static str {
        match self.scope {
            TabScope::Line => "tab-character",
            TabScope::File => "file-tab-character",
        }
    }

    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        let line = reported_line(lines, violation)?;
        let column = violation.column_index();
        if column > line.chars().count() {
            return Err(column_error(violation, line));
        }

        let index = violation.line_index();
        let last = match self.scope {
            TabScope::Line => index,
            TabScope::File => lines.len() - 1,
        };

        Ok(lines
            .iter()
            .enumerate()
            .map(|(i, l)| match i {
                i if i == index => expand_tabs(l, column, self.tab_width),
                i if i > index && i <= last => expand_tabs(l, 0, self.tab_width),
                _ => l.clone(),
            })
            .collect())
    }
}
