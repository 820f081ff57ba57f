//! # stylepatch-formatters
//!
//! Built-in line formatters for stylepatch.
//!
//! Each formatter fixes one kind of mechanical style violation by editing
//! raw lines. [`BuiltinRegistry`] maps the analyzer's violation keys to them.
//!
//! ## Available Formatters
//!
//! | Name | Keys | Fix |
//! |------|------|-----|
//! | `require-this` | `require.this.variable`, `require.this.method` | Inserts `this.` |
//! | `final-parameter` | `final.parameter` | Inserts `final ` |
//! | `whitespace-*` | `ws.notPreceded`, `ws.notFollowed`, `ws.preceded`, `ws.followed` | Inserts or removes one space |
//! | `indentation` | `indentation.error`, `indentation.child.error` (and `.multi`) | Moves one space toward the expected level |
//! | `import-order` | `import.ordering` | Splits shared lines or moves an import up |
//! | `import-groups` | `import.groups.separated.internally` | Removes a blank line inside a group |
//! | `import-separation` | `import.separation` | Inserts a blank line between groups |
//! | `unused-import`, `duplicate-import`, `redundant-import` | `import.unused`, `import.duplicate`, `import.lang` | Removes the statement |
//! | `trailing-spaces` | `Line has trailing spaces.` | Strips trailing whitespace |
//! | `tab-character`, `file-tab-character` | `containsTab`, `file.containsTab` | Expands tabs |
//!
//! ## Usage
//!
//! ```ignore
//! use stylepatch_core::Patcher;
//! use stylepatch_formatters::BuiltinRegistry;
//!
//! let patcher = Patcher::builder(BuiltinRegistry::new()).build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod import_groups;
mod import_order;
mod indentation;
mod qualifier;
mod registry;
mod remove_import;
mod tab_character;
mod trailing_spaces;
mod whitespace;

pub mod keys;

pub use import_groups::{ImportGroups, ImportSeparation};
pub use import_order::ImportOrder;
pub use indentation::{expected_indentation, parse_indentation_levels, Indentation};
pub use qualifier::{InsertQualifier, Qualifier};
pub use registry::{BuiltinRegistry, Formatter, FormatterKind, BUILTIN_KEYS};
pub use remove_import::{Redundancy, RemoveImport};
pub use tab_character::{expand_tabs, ExpandTabs, TabScope, DEFAULT_TAB_WIDTH};
pub use trailing_spaces::TrailingSpaces;
pub use whitespace::{Adjacency, WhitespaceAround};

/// Re-export core types for convenience.
pub use stylepatch_core::{EditSide, FormatError, FormatterRegistry, LineFormatter, Violation};
