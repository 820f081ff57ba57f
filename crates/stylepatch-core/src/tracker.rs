//! Change tracking across writes within one invocation.
//!
//! A [`ChangeTracker`] remembers every content digest written per path. A
//! write counts as a change when its digest is new for that path, so the
//! first write of a path always counts, and returning to content that was
//! already written earlier in the same invocation does not.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use xxhash_rust::xxh64::xxh64;

/// Receives a notification for every changed file.
pub trait ChangeListener: Send + Sync {
    /// Called once per novel write of `path`.
    fn on_changed(&self, path: &Path);
}

impl<F> ChangeListener for F
where
    F: Fn(&Path) + Send + Sync,
{
    fn on_changed(&self, path: &Path) {
        self(path);
    }
}

/// Digest of the exact bytes written to disk.
#[must_use]
pub fn content_digest(bytes: &[u8]) -> u64 {
    xxh64(bytes, 0)
}

/// Per-path record of written digests.
///
/// Create one per invocation and drop it at the end; nothing is ever pruned.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    seen: Mutex<HashMap<PathBuf, HashSet<u64>>>,
}

impl ChangeTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `digest` for `path`, returning `true` if it was not seen before.
    ///
    /// Check and insert happen under one lock.
    pub fn record(&self, path: &Path, digest: u64) -> bool {
        let mut seen = self.seen.lock();
        seen.entry(path.to_path_buf()).or_default().insert(digest)
    }

    /// Number of distinct digests recorded for `path`.
    #[must_use]
    pub fn digest_count(&self, path: &Path) -> usize {
        self.seen.lock().get(path).map_or(0, HashSet::len)
    }

    /// Number of paths with at least one recorded digest.
    #[must_use]
    pub fn tracked_files(&self) -> usize {
        self.seen.lock().len()
    }
}
