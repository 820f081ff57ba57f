//! Wiring of the core patcher with the built-in formatters.

use stylepatch_core::{ChangeListener, ChangeTracker, Config, PatchError, PatchResult, Patcher, ViolationReport};
use stylepatch_formatters::BuiltinRegistry;

/// Builds a patcher over the built-in formatters from `config`.
///
/// # Errors
///
/// Returns an error if an exclude pattern is not a valid glob.
pub fn default_patcher(config: &Config) -> Result<Patcher<BuiltinRegistry>, PatchError> {
    Patcher::builder(BuiltinRegistry::from_config(config))
        .config(config.clone())
        .build()
}

/// Patches every file of `report` with a fresh change tracker.
///
/// # Errors
///
/// Returns an error if the patcher cannot be built. Per-file failures are
/// reported in [`PatchResult::failures`].
pub fn apply(report: &ViolationReport, config: &Config) -> Result<PatchResult, PatchError> {
    let patcher = default_patcher(config)?;
    Ok(patcher.patch_report(report, &ChangeTracker::new()))
}

/// Like [`apply`], notifying `listener` about every changed file.
///
/// # Errors
///
/// See [`apply`].
pub fn apply_with_listener<L>(
    report: &ViolationReport,
    config: &Config,
    listener: L,
) -> Result<PatchResult, PatchError>
where
    L: ChangeListener + 'static,
{
    let patcher = Patcher::builder(BuiltinRegistry::from_config(config))
        .config(config.clone())
        .listener(listener)
        .build()?;
    Ok(patcher.patch_report(report, &ChangeTracker::new()))
}
