use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A wait for a key's lock exceeded its deadline.
#[derive(Debug, thiserror::Error)]
#[error("timed out waiting for lock on key: {key}")]
pub struct AcquireTimeout {
    /// The contended key.
    pub key: String,
}

/// Exclusive ownership of one key's mutual-exclusion slot.
///
/// The slot is released when the guard drops -- on normal return, on error
/// propagation, and on panic unwind alike. Guards must not outlive the scope
/// of a single operation.
#[derive(Debug)]
pub struct KeyGuard {
    _slot: OwnedMutexGuard<()>,
}

/// Lazily-populated table of per-key locks.
///
/// One `Arc<Mutex<()>>` exists per key for the lifetime of the registry;
/// concurrent first-accesses to a brand-new key agree on a single lock
/// object. The table grows monotonically unless [`prune`](Self::prune) is
/// called.
///
/// Fairness among waiters on the same key is whatever [`tokio::sync::Mutex`]
/// provides; only mutual exclusion is guaranteed.
pub struct KeyLockRegistry {
    slots: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyLockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// The key's shared slot, inserted if absent.
    ///
    /// The entry API holds the map shard exclusively for the duration, so
    /// racing first-callers cannot create two slots for one key.
    fn slot(&self, key: &str) -> Arc<Mutex<()>> {
        self.slots.entry(key.to_owned()).or_default().clone()
    }

    /// Wait until `key`'s slot is free and claim it.
    ///
    /// Never fails; blocks for as long as the current holder keeps its
    /// guard. Use [`acquire_timeout`](Self::acquire_timeout) to bound the
    /// wait.
    pub async fn acquire(&self, key: &str) -> KeyGuard {
        let slot = self.slot(key);
        KeyGuard {
            _slot: slot.lock_owned().await,
        }
    }

    /// Like [`acquire`](Self::acquire), but gives up after `limit`.
    pub async fn acquire_timeout(
        &self,
        key: &str,
        limit: Duration,
    ) -> Result<KeyGuard, AcquireTimeout> {
        let slot = self.slot(key);
        match tokio::time::timeout(limit, slot.lock_owned()).await {
            Ok(guard) => Ok(KeyGuard { _slot: guard }),
            Err(_elapsed) => Err(AcquireTimeout {
                key: key.to_owned(),
            }),
        }
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no key has ever been acquired (or all were pruned).
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Evict entries with no current holder and no waiter, returning the
    /// number removed.
    ///
    /// An entry is idle exactly when the map holds the only reference to its
    /// slot: every holder or waiter owns a clone of the `Arc` for the full
    /// span of its acquire, and the shard lock held during eviction excludes
    /// a concurrent first clone. A key acquired again after eviction simply
    /// gets a fresh slot.
    pub fn prune(&self) -> usize {
        let mut removed = 0;
        self.slots.retain(|_, slot| {
            let keep = Arc::strong_count(slot) > 1;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }
}

impl Default for KeyLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyLockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyLockRegistry")
            .field("key_count", &self.slots.len())
            .finish()
    }
}
