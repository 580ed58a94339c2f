//! In-progress markers for long-running operations
//!
//! One [`OperationLocks`] table exists per operation type (downloads keyed by
//! magnet link, compressions keyed by filename). A key is present exactly
//! while its operation runs: [`OperationLocks::try_acquire`] checks and marks
//! under a single mutex acquisition, and the returned [`LockGuard`] removes
//! the key when dropped, whichever way the operation ends.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Shared table of resource keys with an operation currently running
#[derive(Clone, Debug)]
pub struct OperationLocks {
    kind: &'static str,
    keys: Arc<Mutex<HashSet<String>>>,
}

impl OperationLocks {
    /// Create an empty table; `kind` names the operation in log output
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            keys: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Mark `key` as in progress
    ///
    /// Returns `None` when the key is already held. The check and the insert
    /// happen under one lock with no await point in between.
    pub fn try_acquire(&self, key: &str) -> Option<LockGuard> {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        if !keys.insert(key.to_string()) {
            tracing::warn!("{} already in progress for {}", self.kind, key);
            return None;
        }
        tracing::debug!("{} lock acquired for {}", self.kind, key);

        Some(LockGuard {
            table: self.clone(),
            key: key.to_string(),
        })
    }

    /// Whether an operation for `key` is currently running
    pub fn is_locked(&self, key: &str) -> bool {
        let keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        keys.contains(key)
    }

    /// Number of operations currently running
    pub fn len(&self) -> usize {
        let keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, key: &str) {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        keys.remove(key);
        tracing::debug!("{} lock released for {}", self.kind, key);
    }
}

/// Scoped hold on one key of an [`OperationLocks`] table
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard {
    table: OperationLocks,
    key: String,
}

impl LockGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.table.release(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_refused() {
        let locks = OperationLocks::new("download");
        let guard = locks.try_acquire("magnet:?xt=urn:btih:abc");
        assert!(guard.is_some());
        assert!(locks.try_acquire("magnet:?xt=urn:btih:abc").is_none());
        assert!(locks.is_locked("magnet:?xt=urn:btih:abc"));
    }

    #[test]
    fn test_drop_releases_key() {
        let locks = OperationLocks::new("compress");
        {
            let _guard = locks.try_acquire("video.mkv").unwrap();
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
        assert!(locks.try_acquire("video.mkv").is_some());
    }

    #[test]
    fn test_keys_are_independent() {
        let locks = OperationLocks::new("compress");
        let _a = locks.try_acquire("a.mkv").unwrap();
        let _b = locks.try_acquire("b.mkv").unwrap();
        assert_eq!(locks.len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let locks = OperationLocks::new("download");
        let other = locks.clone();
        let guard = locks.try_acquire("key").unwrap();
        assert!(other.is_locked("key"));
        assert_eq!(guard.key(), "key");
        drop(guard);
        assert!(!other.is_locked("key"));
    }

    #[test]
    fn test_release_survives_panic() {
        let locks = OperationLocks::new("compress");
        let inner = locks.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = inner.try_acquire("boom.mkv").unwrap();
            panic!("operation blew up");
        });
        assert!(result.is_err());
        assert!(!locks.is_locked("boom.mkv"));
    }

    #[test]
    fn test_concurrent_acquire_admits_one() {
        let locks = OperationLocks::new("download");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                std::thread::spawn(move || locks.try_acquire("same").map(std::mem::forget).is_some())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
