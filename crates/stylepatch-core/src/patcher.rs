//! Core patcher for orchestrating violation fixes.

use crate::config::Config;
use crate::formatter::{FormatError, FormatterRegistry, LineFormatter};
use crate::line_ending::LineEnding;
use crate::ordering::{sort_for_patching_by, EditSide};
use crate::tracker::{content_digest, ChangeListener, ChangeTracker};
use crate::types::{FileFailure, FileOutcome, FileViolations, PatchResult, Violation, ViolationReport};
use crate::utils::split_lines;

use miette::Diagnostic;
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while patching a file.
#[derive(Debug, Error, Diagnostic)]
pub enum PatchError {
    /// The file could not be read or written.
    #[error("IO error on {path}: {source}")]
    #[diagnostic(code(stylepatch::io))]
    Io {
        /// File being patched.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A formatter rejected the file's content or a violation.
    #[error("Cannot patch {path}: {source}")]
    #[diagnostic(
        code(stylepatch::format),
        help("the file was left unchanged; check that the report matches the file on disk")
    )]
    Format {
        /// File being patched.
        path: PathBuf,
        /// Formatter error.
        source: FormatError,
    },

    /// Exclude glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    #[diagnostic(code(stylepatch::glob))]
    Glob(#[from] glob::PatternError),
}

impl PatchError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A buffer after all violations of a file were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchedLines {
    /// The rewritten lines.
    pub lines: Vec<String>,
    /// Number of violations whose formatter ran.
    pub applied: usize,
    /// Number of violations skipped by a gate.
    pub gated: usize,
    /// Keys without an enabled formatter.
    pub unresolved: Vec<String>,
}

/// Builder for configuring a [`Patcher`].
pub struct PatcherBuilder<R> {
    registry: R,
    config: Config,
    line_ending: Option<LineEnding>,
    listener: Option<Box<dyn ChangeListener>>,
    exclude_patterns: Vec<String>,
    parallel: Option<bool>,
}

impl<R: FormatterRegistry> PatcherBuilder<R> {
    /// Creates a new builder around a formatter registry.
    #[must_use]
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            config: Config::default(),
            line_ending: None,
            listener: None,
            exclude_patterns: Vec::new(),
            parallel: None,
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Overrides the configured line ending.
    #[must_use]
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = Some(line_ending);
        self
    }

    /// Registers the listener notified about changed files.
    #[must_use]
    pub fn listener<L: ChangeListener + 'static>(mut self, listener: L) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Overrides the configured parallelism.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Builds the patcher.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Patcher<R>, PatchError> {
        let line_ending = self
            .line_ending
            .unwrap_or_else(|| self.config.line_ending());

        let exclude = self
            .exclude_patterns
            .iter()
            .chain(&self.config.patcher.exclude)
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Patcher {
            registry: self.registry,
            line_ending,
            listener: self.listener,
            exclude,
            parallel: self.parallel.unwrap_or(self.config.patcher.parallel),
            config: self.config,
        })
    }
}

/// Applies violation reports to files on disk.
///
/// Use [`Patcher::builder()`] to construct an instance.
pub struct Patcher<R> {
    registry: R,
    config: Config,
    line_ending: LineEnding,
    listener: Option<Box<dyn ChangeListener>>,
    exclude: Vec<glob::Pattern>,
    parallel: bool,
}

impl<R: FormatterRegistry> Patcher<R> {
    /// Creates a new builder around a formatter registry.
    #[must_use]
    pub fn builder(registry: R) -> PatcherBuilder<R> {
        PatcherBuilder::new(registry)
    }

    /// Returns the line ending used for written files.
    #[must_use]
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Applies every violation of one file to its lines.
    ///
    /// Violations are sorted into patch order first, with same-position
    /// violations tiered by their formatter's [`EditSide`]. Gates see the
    /// sorted list.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormatError`] raised by a formatter.
    pub fn patch_lines(
        &self,
        violations: &[Violation],
        lines: Vec<String>,
    ) -> Result<PatchedLines, FormatError> {
        let mut sorted = violations.to_vec();
        sort_for_patching_by(&mut sorted, |v| {
            self.registry
                .resolve(&v.key)
                .map_or(EditSide::At, |f| f.edit_side())
        });

        let mut patched = PatchedLines {
            lines,
            ..PatchedLines::default()
        };

        for violation in &sorted {
            let formatter = if self.config.is_formatter_enabled(&violation.key) {
                self.registry.resolve(&violation.key)
            } else {
                debug!("Formatter disabled for {}", violation.key);
                None
            };

            let Some(formatter) = formatter else {
                patched.unresolved.push(violation.key.clone());
                continue;
            };

            if !formatter.can_apply(violation, &sorted) {
                debug!("{} skipped {}", formatter.name(), violation);
                patched.gated += 1;
                continue;
            }

            debug!("{} fixing {}", formatter.name(), violation);
            patched.lines = formatter.format(violation, &patched.lines)?;
            patched.applied += 1;
        }

        Ok(patched)
    }

    /// Joins lines with the configured terminator after every line.
    #[must_use]
    pub fn serialize(&self, lines: &[String]) -> String {
        let terminator = self.line_ending.as_str();
        let mut content =
            String::with_capacity(lines.iter().map(|l| l.len() + terminator.len()).sum());
        for line in lines {
            content.push_str(line);
            content.push_str(terminator);
        }
        content
    }

    /// Reads, patches and rewrites one file.
    ///
    /// The listener is notified after the write if the written content is new
    /// for this path in `tracker`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or if a
    /// formatter fails. Nothing is written in the error case.
    pub fn patch_file(
        &self,
        path: &Path,
        violations: &[Violation],
        tracker: &ChangeTracker,
    ) -> Result<FileOutcome, PatchError> {
        debug!("Patching {} ({} violations)", path.display(), violations.len());

        let content = std::fs::read_to_string(path).map_err(|e| PatchError::io(path, e))?;
        let lines = split_lines(&content);

        let patched = self
            .patch_lines(violations, lines)
            .map_err(|source| PatchError::Format {
                path: path.to_path_buf(),
                source,
            })?;

        let serialized = self.serialize(&patched.lines);
        write_atomically(path, serialized.as_bytes()).map_err(|e| PatchError::io(path, e))?;

        let changed = tracker.record(path, content_digest(serialized.as_bytes()));
        if changed {
            if let Some(listener) = &self.listener {
                listener.on_changed(path);
            }
        }

        Ok(FileOutcome {
            path: path.to_path_buf(),
            applied: patched.applied,
            gated: patched.gated,
            unresolved: patched.unresolved,
            changed,
        })
    }

    /// Patches every file of a report.
    ///
    /// Entries naming the same path are merged into one, so each file is read
    /// and written once. A failing file is recorded in
    /// [`PatchResult::failures`] and does not stop the other files.
    pub fn patch_report(&self, report: &ViolationReport, tracker: &ChangeTracker) -> PatchResult {
        info!(
            "Patching {} violations in {} files",
            report.violation_count(),
            report.files.len()
        );

        let mut result = PatchResult::new();
        let mut pending: Vec<FileViolations> = Vec::new();
        let mut index: HashMap<&Path, usize> = HashMap::new();
        for file in &report.files {
            if file.violations.is_empty() {
                debug!("No violations for {}", file.path.display());
                result.skipped += 1;
            } else if self.should_exclude(&file.path) {
                debug!("Excluding: {}", file.path.display());
                result.skipped += 1;
            } else if let Some(&at) = index.get(file.path.as_path()) {
                debug!("Merging repeated entry for {}", file.path.display());
                pending[at].violations.extend(file.violations.iter().cloned());
            } else {
                index.insert(file.path.as_path(), pending.len());
                pending.push(file.clone());
            }
        }

        let run = |file: &FileViolations| {
            self.patch_file(&file.path, &file.violations, tracker)
                .map_err(|e| {
                    warn!("{e}");
                    FileFailure {
                        path: file.path.clone(),
                        message: e.to_string(),
                    }
                })
        };

        let outcomes: Vec<Result<FileOutcome, FileFailure>> = if self.parallel {
            pending.par_iter().map(run).collect()
        } else {
            pending.iter().map(run).collect()
        };

        for outcome in outcomes {
            match outcome {
                Ok(o) => result.outcomes.push(o),
                Err(f) => result.failures.push(f),
            }
        }
        result.sort();

        info!(
            "Patching complete: {} fixes applied, {} files changed, {} failed",
            result.applied_count(),
            result.changed_count(),
            result.failures.len()
        );

        result
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|p| p.matches(&path_str))
    }
}

/// Writes `bytes` to a temporary file next to `path` and moves it into place.
fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = std::fs::metadata(path)?.permissions();

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.as_file().set_permissions(permissions)?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Appends the violation key to the reported line; gated off for "skip".
    struct Append;

    impl LineFormatter for Append {
        fn name(&self) -> &'static str {
            "append"
        }

        fn can_apply(&self, violation: &Violation, _violations: &[Violation]) -> bool {
            violation.key != "skip"
        }

        fn format(
            &self,
            violation: &Violation,
            lines: &[String],
        ) -> Result<Vec<String>, FormatError> {
            let mut lines = lines.to_vec();
            let line = lines
                .get_mut(violation.line_index())
                .ok_or(FormatError::LineOutOfRange {
                    line: violation.line,
                    len: 0,
                })?;
            line.push_str(&violation.key);
            Ok(lines)
        }
    }

    struct TestRegistry;

    impl FormatterRegistry for TestRegistry {
        type Formatter = Append;

        fn resolve(&self, key: &str) -> Option<Append> {
            (key != "unknown").then_some(Append)
        }
    }

    fn patcher() -> Patcher<TestRegistry> {
        Patcher::builder(TestRegistry)
            .line_ending(LineEnding::Lf)
            .build()
            .expect("Failed to build patcher")
    }

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn applies_fixes_bottom_up() {
        let violations = vec![
            Violation::new(1, 1, "a", ""),
            Violation::new(2, 1, "b", ""),
            Violation::new(1, 5, "c", ""),
        ];
        let patched = patcher()
            .patch_lines(&violations, lines(&["x", "y"]))
            .unwrap();

        assert_eq!(patched.lines, vec!["xca", "yb"]);
        assert_eq!(patched.applied, 3);
    }

    #[test]
    fn tracks_gated_and_unresolved() {
        let violations = vec![
            Violation::new(1, 1, "skip", ""),
            Violation::new(1, 2, "unknown", ""),
            Violation::new(1, 3, "ok", ""),
        ];
        let patched = patcher().patch_lines(&violations, lines(&["x"])).unwrap();

        assert_eq!(patched.lines, vec!["xok"]);
        assert_eq!(patched.gated, 1);
        assert_eq!(patched.unresolved, vec!["unknown"]);
    }

    #[test]
    fn disabled_formatters_are_unresolved() {
        let config = Config::parse("[formatters.off]\nenabled = false\n").unwrap();
        let patcher = Patcher::builder(TestRegistry).config(config).build().unwrap();

        let patched = patcher
            .patch_lines(&[Violation::new(1, 1, "off", "")], lines(&["x"]))
            .unwrap();
        assert_eq!(patched.lines, vec!["x"]);
        assert_eq!(patched.unresolved, vec!["off"]);
    }

    #[test]
    fn serialize_terminates_every_line() {
        let patcher = Patcher::builder(TestRegistry)
            .line_ending(LineEnding::Crlf)
            .build()
            .unwrap();
        assert_eq!(patcher.serialize(&lines(&["a", "b"])), "a\r\nb\r\n");
        assert_eq!(patcher.serialize(&[]), "");
    }

    #[test]
    fn patch_file_rewrites_and_notifies() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("A.java");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let patcher = Patcher::builder(TestRegistry)
            .line_ending(LineEnding::Lf)
            .listener(move |_: &Path| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();
        let tracker = ChangeTracker::new();

        let outcome = patcher
            .patch_file(&path, &[Violation::new(2, 1, "!", "")], &tracker)
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo!\n");

        // Same content written again is not a change.
        std::fs::write(&path, "one\ntwo\n").unwrap();
        let outcome = patcher
            .patch_file(&path, &[Violation::new(2, 1, "!", "")], &tracker)
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unchanged_first_write_still_notifies() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("A.java");
        std::fs::write(&path, "same\n").unwrap();

        let outcome = patcher()
            .patch_file(&path, &[Violation::new(1, 1, "unknown", "")], &ChangeTracker::new())
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "same\n");
    }

    #[test]
    fn format_errors_leave_file_untouched() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("A.java");
        std::fs::write(&path, "one").unwrap();

        let err = patcher()
            .patch_file(&path, &[Violation::new(9, 1, "x", "")], &ChangeTracker::new())
            .unwrap_err();
        assert!(matches!(err, PatchError::Format { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = patcher()
            .patch_file(
                &dir.path().join("missing.java"),
                &[Violation::new(1, 1, "x", "")],
                &ChangeTracker::new(),
            )
            .unwrap_err();
        assert!(matches!(err, PatchError::Io { .. }));
    }

    #[test]
    fn report_failures_do_not_stop_other_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("Good.java");
        let empty = dir.path().join("Empty.java");
        std::fs::write(&good, "a\n").unwrap();
        std::fs::write(&empty, "untouched").unwrap();

        let report = ViolationReport::new()
            .with_file(FileViolations::new(
                dir.path().join("Missing.java"),
                vec![Violation::new(1, 1, "x", "")],
            ))
            .with_file(FileViolations::new(&good, vec![Violation::new(1, 1, "x", "")]))
            .with_file(FileViolations::new(&empty, Vec::new()));

        for parallel in [false, true] {
            std::fs::write(&good, "a\n").unwrap();
            let patcher = Patcher::builder(TestRegistry)
                .line_ending(LineEnding::Lf)
                .parallel(parallel)
                .build()
                .unwrap();
            let result = patcher.patch_report(&report, &ChangeTracker::new());

            assert_eq!(result.outcomes.len(), 1);
            assert_eq!(result.failures.len(), 1);
            assert_eq!(result.skipped, 1);
            assert_eq!(std::fs::read_to_string(&good).unwrap(), "ax\n");
            assert_eq!(std::fs::read_to_string(&empty).unwrap(), "untouched");
        }
    }

    #[test]
    fn excluded_files_are_skipped() {
        let patcher = Patcher::builder(TestRegistry)
            .exclude("**/generated/**")
            .build()
            .unwrap();
        let report = ViolationReport::new().with_file(FileViolations::new(
            "src/generated/A.java",
            vec![Violation::new(1, 1, "x", "")],
        ));

        let result = patcher.patch_report(&report, &ChangeTracker::new());
        assert_eq!(result.skipped, 1);
        assert!(result.outcomes.is_empty());
        assert!(!result.has_failures());
    }

    #[test]
    fn invalid_exclude_pattern_fails_build() {
        let result = Patcher::builder(TestRegistry).exclude("[").build();
        assert!(matches!(result, Err(PatchError::Glob(_))));
    }

    #[test]
    fn repeated_entries_for_one_path_are_merged() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("A.java");

        let report = ViolationReport::new()
            .with_file(FileViolations::new(&path, vec![Violation::new(1, 1, "a", "")]))
            .with_file(FileViolations::new(&path, vec![Violation::new(2, 1, "b", "")]));

        for parallel in [false, true] {
            std::fs::write(&path, "x\ny\n").unwrap();
            let patcher = Patcher::builder(TestRegistry)
                .line_ending(LineEnding::Lf)
                .parallel(parallel)
                .build()
                .unwrap();
            let result = patcher.patch_report(&report, &ChangeTracker::new());

            assert_eq!(result.outcomes.len(), 1);
            assert_eq!(result.applied_count(), 2);
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "xa\nyb\n");
        }
    }
}
