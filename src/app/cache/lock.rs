//! Per-key mutual exclusion for cache entries
//!
//! Regenerating a cache entry must happen at most once even when several
//! locations reference the same artifact. Every target path gets its own
//! mutex, created on first use. The table itself is locked only long enough
//! to look up or insert an entry, so work on distinct keys never serializes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Lazily populated table of per-path locks
#[derive(Debug, Default)]
pub struct KeyedLocks {
    table: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock guarding `key`, created on demand
    pub fn lock_for(&self, key: &Path) -> Arc<Mutex<()>> {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(table.entry(key.to_path_buf()).or_default())
    }

    /// Run `f` while holding the lock for `key`
    ///
    /// A lock poisoned by a panicking holder is taken over; the guarded state
    /// lives on disk and is re-validated by the caller.
    pub fn with_lock<T>(&self, key: &Path, f: impl FnOnce() -> T) -> T {
        let entry = self.lock_for(key);
        let _guard = entry.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of keys seen so far
    pub fn len(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
