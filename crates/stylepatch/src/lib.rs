//! # stylepatch
//!
//! Applies style violation reports back to the source files.
//!
//! This is the facade crate that re-exports the core engine and the built-in
//! formatters, and wires them together.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stylepatch::{Config, FileViolations, Violation, ViolationReport};
//!
//! let report = ViolationReport::new().with_file(FileViolations::new(
//!     "src/main/java/App.java",
//!     vec![Violation::new(12, 18, "ws.notFollowed", "',' is not followed by whitespace.")],
//! ));
//!
//! let result = stylepatch::apply(&report, &Config::default())?;
//! println!("{} files changed", result.changed_count());
//! ```
//!
//! ## Convergence
//!
//! Indentation and import order are fixed one step per run. Run again until
//! the analyzer reports nothing for them.

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use stylepatch_core::*;

/// Built-in formatters and their registry.
pub mod formatters {
    pub use stylepatch_formatters::*;
}

mod runner;

pub use runner::{apply, apply_with_listener, default_patcher};
