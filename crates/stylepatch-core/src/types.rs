//! Core types for violation records and patch results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single style violation reported by the upstream analyzer.
///
/// Line and column are 1-indexed and always refer to the original,
/// unmodified content of the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Violation key (e.g., "ws.notFollowed").
    pub key: String,
    /// Human-readable message as produced by the analyzer.
    #[serde(default)]
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        line: usize,
        column: usize,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            key: key.into(),
            message: message.into(),
        }
    }

    /// Returns the 0-based index of the reported line.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line.saturating_sub(1)
    }

    /// Returns the 0-based index of the reported column.
    #[must_use]
    pub fn column_index(&self) -> usize {
        self.column.saturating_sub(1)
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: [{}] {}", self.line, self.column, self.key, self.message)
    }
}

/// All violations reported for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileViolations {
    /// Path of the file the violations belong to.
    pub path: PathBuf,
    /// Violations in no particular order.
    #[serde(default)]
    pub violations: Vec<Violation>,
}

impl FileViolations {
    /// Creates a new entry.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, violations: Vec<Violation>) -> Self {
        Self {
            path: path.into(),
            violations,
        }
    }
}

/// A violation report covering any number of files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationReport {
    /// Per-file violation lists.
    #[serde(default)]
    pub files: Vec<FileViolations>,
}

impl ViolationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the violations of one file.
    #[must_use]
    pub fn with_file(mut self, file: FileViolations) -> Self {
        self.files.push(file);
        self
    }

    /// Total number of violations in the report.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.files.iter().map(|f| f.violations.len()).sum()
    }
}

/// What happened to one file during patching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Path of the patched file.
    pub path: PathBuf,
    /// Number of violations whose formatter ran.
    pub applied: usize,
    /// Number of violations skipped by a formatter gate.
    pub gated: usize,
    /// Keys of violations without an enabled formatter, in processing order.
    pub unresolved: Vec<String>,
    /// Whether the change listener was notified for this write.
    pub changed: bool,
}

/// A file that could not be patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path of the file.
    pub path: PathBuf,
    /// Rendered error message.
    pub message: String,
}

/// Result of patching a whole report.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PatchResult {
    /// Files that were patched and written.
    pub outcomes: Vec<FileOutcome>,
    /// Files whose patch attempt failed.
    pub failures: Vec<FileFailure>,
    /// Files skipped by exclude patterns or because they had no violations.
    pub skipped: usize,
}

impl PatchResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any file failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of files the listener was notified about.
    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.changed).count()
    }

    /// Total number of applied fixes across all files.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.applied).sum()
    }

    /// Unresolved keys across all files, deduplicated and sorted.
    #[must_use]
    pub fn unresolved_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .outcomes
            .iter()
            .flat_map(|o| o.unresolved.iter().map(String::as_str))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Orders outcomes and failures by path.
    pub fn sort(&mut self) {
        self.outcomes.sort_by(|a, b| a.path.cmp(&b.path));
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));
    }
}
