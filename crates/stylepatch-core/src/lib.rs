//! # stylepatch-core
//!
//! Core engine for patching source files from style violation reports.
//!
//! An upstream analyzer detects mechanical style problems; this crate
//! rewrites the raw source text to fix them without parsing it. It includes:
//!
//! - [`Violation`] and [`ViolationReport`] for the analyzer's findings
//! - [`sort_for_patching`] for the bottom-up processing order
//! - [`ImportScanner`] for locating import statements in raw lines
//! - [`LineFormatter`] and [`FormatterRegistry`] traits for per-kind fixes
//! - [`Patcher`] for orchestrating read, fix, write and change detection
//!
//! ## Example
//!
//! ```ignore
//! use stylepatch_core::{ChangeTracker, Patcher};
//!
//! let patcher = Patcher::builder(MyRegistry)
//!     .line_ending(LineEnding::Lf)
//!     .build()?;
//!
//! let tracker = ChangeTracker::new();
//! let result = patcher.patch_report(&report, &tracker);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod formatter;
mod line_ending;
mod ordering;
mod patcher;
mod tracker;
mod types;

pub mod scanner;

/// Utility modules for formatter implementations.
pub mod utils;

pub use config::{Config, ConfigError, FormatterConfig, PatcherConfig};
pub use formatter::{FormatError, FormatterRegistry, LineFormatter};
pub use line_ending::LineEnding;
pub use ordering::{patch_order, sort_for_patching, sort_for_patching_by, EditSide};
pub use patcher::{PatchError, PatchedLines, Patcher, PatcherBuilder};
pub use scanner::{every_import_on_separate_line, ImportScanner, Position, ScanError, Token};
pub use tracker::{content_digest, ChangeListener, ChangeTracker};
pub use types::{
    FileFailure, FileOutcome, FileViolations, PatchResult, Violation, ViolationReport,
};
