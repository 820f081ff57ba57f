//! Processing order for violations within one file.
//!
//! Violations are applied bottom-up and right-to-left: line descending, then
//! column descending. An edit only moves content to its right on the same
//! line or below it, so every violation still waiting to be processed keeps
//! valid coordinates.
//!
//! Violations sharing a position are tiered by [`EditSide`]: an edit right
//! of the reported character runs before one that shifts the character.

use crate::types::Violation;
use std::cmp::{Ordering, Reverse};

/// Where a formatter edits relative to the reported column.
///
/// The variant order is the processing order among violations at the same
/// line and column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditSide {
    /// Right of the reported character.
    After,
    /// At the column without moving it, or the line as a whole.
    #[default]
    At,
    /// Directly left of the reported character, shifting it.
    Before,
    /// The leading whitespace of the line.
    Leading,
}

/// Compares two violations in patch order.
#[must_use]
pub fn patch_order(a: &Violation, b: &Violation) -> Ordering {
    b.line.cmp(&a.line).then(b.column.cmp(&a.column))
}

/// Sorts violations into patch order.
///
/// The sort is stable, so violations at identical positions keep their input order.
pub fn sort_for_patching(violations: &mut [Violation]) {
    violations.sort_by(patch_order);
}

/// Sorts violations into patch order, tiering same-position violations by `side`.
///
/// Within one tier the input order is kept.
pub fn sort_for_patching_by<F>(violations: &mut [Violation], side: F)
where
    F: Fn(&Violation) -> EditSide,
{
    violations.sort_by_cached_key(|v| (Reverse(v.line), Reverse(v.column), side(v)));
}
