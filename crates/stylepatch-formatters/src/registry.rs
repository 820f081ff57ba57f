//! The closed set of built-in formatters and the key lookup.

use crate::import_groups::{ImportGroups, ImportSeparation};
use crate::import_order::ImportOrder;
use crate::indentation::Indentation;
use crate::keys;
use crate::qualifier::InsertQualifier;
use crate::remove_import::{Redundancy, RemoveImport};
use crate::tab_character::{ExpandTabs, TabScope, DEFAULT_TAB_WIDTH};
use crate::trailing_spaces::TrailingSpaces;
use crate::whitespace::{Adjacency, WhitespaceAround};
use stylepatch_core::{Config, EditSide, FormatError, FormatterRegistry, LineFormatter, Violation};

/// Every key with a built-in formatter.
pub const BUILTIN_KEYS: &[&str] = &[
    keys::REQUIRE_THIS_VARIABLE,
    keys::REQUIRE_THIS_METHOD,
    keys::FINAL_PARAMETER,
    keys::WS_NOT_PRECEDED,
    keys::WS_NOT_FOLLOWED,
    keys::WS_PRECEDED,
    keys::WS_FOLLOWED,
    keys::INDENTATION,
    keys::INDENTATION_CHILD,
    keys::INDENTATION_MULTI,
    keys::INDENTATION_CHILD_MULTI,
    keys::IMPORT_ORDERING,
    keys::IMPORT_GROUPS_SEPARATED_INTERNALLY,
    keys::IMPORT_SEPARATION,
    keys::IMPORT_UNUSED,
    keys::IMPORT_DUPLICATE,
    keys::IMPORT_LANG,
    keys::TRAILING_SPACES,
    keys::CONTAINS_TAB,
    keys::FILE_CONTAINS_TAB,
];

/// Kind of defect a violation key describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterKind {
    /// Missing `this.`.
    RequireThis,
    /// Missing `final` on a parameter.
    FinalParameter,
    /// Space missing or unwanted next to a token.
    Whitespace(Adjacency),
    /// Wrong indentation.
    Indentation,
    /// Import out of order or sharing a line.
    ImportOrder,
    /// Blank line inside an import group.
    ImportGroups,
    /// Missing blank line between import groups.
    ImportSeparation,
    /// Import that should not exist.
    RemoveImport(Redundancy),
    /// Trailing whitespace.
    TrailingSpaces,
    /// Tab characters.
    Tabs(TabScope),
}

impl FormatterKind {
    /// Maps a violation key to its kind; `None` for keys without a fixer.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let kind = match key {
            keys::REQUIRE_THIS_VARIABLE | keys::REQUIRE_THIS_METHOD => Self::RequireThis,
            keys::FINAL_PARAMETER => Self::FinalParameter,
            keys::INDENTATION
            | keys::INDENTATION_CHILD
            | keys::INDENTATION_MULTI
            | keys::INDENTATION_CHILD_MULTI => Self::Indentation,
            keys::IMPORT_ORDERING => Self::ImportOrder,
            keys::IMPORT_GROUPS_SEPARATED_INTERNALLY => Self::ImportGroups,
            keys::IMPORT_SEPARATION => Self::ImportSeparation,
            keys::IMPORT_UNUSED => Self::RemoveImport(Redundancy::Unused),
            keys::IMPORT_DUPLICATE => Self::RemoveImport(Redundancy::Duplicate),
            keys::IMPORT_LANG => Self::RemoveImport(Redundancy::Lang),
            keys::TRAILING_SPACES => Self::TrailingSpaces,
            keys::CONTAINS_TAB => Self::Tabs(TabScope::Line),
            keys::FILE_CONTAINS_TAB => Self::Tabs(TabScope::File),
            other => Self::Whitespace(Adjacency::from_key(other)?),
        };
        Some(kind)
    }

    /// Builds the formatter for this kind.
    #[must_use]
    pub fn formatter(self, tab_width: usize) -> Formatter {
        match self {
            Self::RequireThis => Formatter::Qualifier(InsertQualifier::this()),
            Self::FinalParameter => Formatter::Qualifier(InsertQualifier::final_modifier()),
            Self::Whitespace(adjacency) => Formatter::Whitespace(WhitespaceAround::new(adjacency)),
            Self::Indentation => Formatter::Indentation(Indentation),
            Self::ImportOrder => Formatter::ImportOrder(ImportOrder),
            Self::ImportGroups => Formatter::ImportGroups(ImportGroups),
            Self::ImportSeparation => Formatter::ImportSeparation(ImportSeparation),
            Self::RemoveImport(redundancy) => Formatter::RemoveImport(RemoveImport::new(redundancy)),
            Self::TrailingSpaces => Formatter::TrailingSpaces(TrailingSpaces),
            Self::Tabs(scope) => Formatter::Tabs(ExpandTabs::new(scope).tab_width(tab_width)),
        }
    }
}

/// One of the built-in formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// See [`InsertQualifier`].
    Qualifier(InsertQualifier),
    /// See [`WhitespaceAround`].
    Whitespace(WhitespaceAround),
    /// See [`Indentation`].
    Indentation(Indentation),
    /// See [`ImportOrder`].
    ImportOrder(ImportOrder),
    /// See [`ImportGroups`].
    ImportGroups(ImportGroups),
    /// See [`ImportSeparation`].
    ImportSeparation(ImportSeparation),
    /// See [`RemoveImport`].
    RemoveImport(RemoveImport),
    /// See [`TrailingSpaces`].
    TrailingSpaces(TrailingSpaces),
    /// See [`ExpandTabs`].
    Tabs(ExpandTabs),
}

impl Formatter {
    fn inner(&self) -> &dyn LineFormatter {
        match self {
            Self::Qualifier(f) => f,
            Self::Whitespace(f) => f,
            Self::Indentation(f) => f,
            Self::ImportOrder(f) => f,
            Self::ImportGroups(f) => f,
            Self::ImportSeparation(f) => f,
            Self::RemoveImport(f) => f,
            Self::TrailingSpaces(f) => f,
            Self::Tabs(f) => f,
        }
    }
}

impl LineFormatter for Formatter {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn can_apply(&self, violation: &Violation, violations: &[Violation]) -> bool {
        self.inner().can_apply(violation, violations)
    }

    fn edit_side(&self) -> EditSide {
        self.inner().edit_side()
    }

    fn format(&self, violation: &Violation, lines: &[String]) -> Result<Vec<String>, FormatError> {
        self.inner().format(violation, lines)
    }
}

/// Registry of the built-in formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinRegistry {
    tab_width: usize,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinRegistry {
    /// Creates a registry with the default tab width.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    /// Creates a registry using the configured tab width.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new().tab_width(config.patcher.tab_width)
    }

    /// Sets the tab stop width for tab expansion.
    #[must_use]
    pub fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }
}

impl FormatterRegistry for BuiltinRegistry {
    type Formatter = Formatter;

    fn resolve(&self, key: &str) -> Option<Formatter> {
        FormatterKind::from_key(key).map(|kind| kind.formatter(self.tab_width))
    }
}
