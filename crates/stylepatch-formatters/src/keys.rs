//! Violation keys reported by the upstream analyzer.

/// Field access without `this.`.
pub const REQUIRE_THIS_VARIABLE: &str = "require.this.variable";
/// Method call without `this.`.
pub const REQUIRE_THIS_METHOD: &str = "require.this.method";
/// Parameter without the `final` modifier.
pub const FINAL_PARAMETER: &str = "final.parameter";

/// Token not preceded by whitespace.
pub const WS_NOT_PRECEDED: &str = "ws.notPreceded";
/// Token not followed by whitespace.
pub const WS_NOT_FOLLOWED: &str = "ws.notFollowed";
/// Token preceded by whitespace.
pub const WS_PRECEDED: &str = "ws.preceded";
/// Token followed by whitespace.
pub const WS_FOLLOWED: &str = "ws.followed";

/// Wrong indentation of a statement.
pub const INDENTATION: &str = "indentation.error";
/// Wrong indentation of a child statement.
pub const INDENTATION_CHILD: &str = "indentation.child.error";
/// Wrong indentation, several levels accepted.
pub const INDENTATION_MULTI: &str = "indentation.error.multi";
/// Wrong child indentation, several levels accepted.
pub const INDENTATION_CHILD_MULTI: &str = "indentation.child.error.multi";

/// Import out of order.
pub const IMPORT_ORDERING: &str = "import.ordering";
/// Blank line inside an import group.
pub const IMPORT_GROUPS_SEPARATED_INTERNALLY: &str = "import.groups.separated.internally";
/// Missing blank line between import groups.
pub const IMPORT_SEPARATION: &str = "import.separation";
/// Import never used.
pub const IMPORT_UNUSED: &str = "import.unused";
/// Import declared twice.
pub const IMPORT_DUPLICATE: &str = "import.duplicate";
/// Import from `java.lang`.
pub const IMPORT_LANG: &str = "import.lang";

/// Trailing whitespace, as reported by a regexp check.
pub const TRAILING_SPACES: &str = "Line has trailing spaces.";
/// Tab character on a line.
pub const CONTAINS_TAB: &str = "containsTab";
/// Tab characters in a file, reported once.
pub const FILE_CONTAINS_TAB: &str = "file.containsTab";
