use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{StoreError, StoreResult};
use crate::record::BlobRecord;
use crate::traits::BlobStore;

/// A stored blob plus the size hint it was written with.
///
/// The hint is remembered so capacity accounting can be reversed exactly when
/// the blob is overwritten or deleted.
#[derive(Clone, Debug)]
struct StoredBlob {
    type_tag: String,
    bytes: Bytes,
    size_hint_gib: f64,
}

#[derive(Debug, Default)]
struct StoreState {
    blobs: HashMap<String, StoredBlob>,
    /// Sum of the size hints of all currently stored blobs.
    used_gib: f64,
}

/// In-memory, HashMap-based blob store.
///
/// Intended for tests, development, and embedding. All blobs are held in
/// memory behind a `RwLock`; `Bytes` payloads are reference-counted so reads
/// are cheap. Data is lost when the process exits.
///
/// An optional capacity budget (in gibibytes) makes the store honor the size
/// hints that accompany every write: a create or update whose hint does not
/// fit the remaining budget fails with [`StoreError::CapacityExceeded`].
pub struct MemoryStore {
    state: RwLock<StoreState>,
    capacity_gib: Option<f64>,
}

impl MemoryStore {
    /// Create a new empty store with no capacity budget.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            capacity_gib: None,
        }
    }

    /// Create a store that rejects writes once the summed size hints would
    /// exceed `capacity_gib`.
    pub fn with_capacity_gib(capacity_gib: f64) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            capacity_gib: Some(capacity_gib),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.state.read().expect("lock poisoned").blobs.len()
    }

    /// Returns `true` if the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.state.read().expect("lock poisoned").blobs.is_empty()
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.state
            .read()
            .expect("lock poisoned")
            .blobs
            .values()
            .map(|blob| blob.bytes.len() as u64)
            .sum()
    }

    /// The type tag a blob was stored with, if the key exists.
    pub fn type_tag_of(&self, key: &str) -> Option<String> {
        self.state
            .read()
            .expect("lock poisoned")
            .blobs
            .get(key)
            .map(|blob| blob.type_tag.clone())
    }

    /// Remove all blobs and reset capacity accounting.
    pub fn clear(&self) {
        let mut state = self.state.write().expect("lock poisoned");
        state.blobs.clear();
        state.used_gib = 0.0;
    }

    /// Insert or overwrite under `key`, keeping `used_gib` consistent.
    ///
    /// `require_existing` distinguishes the update path from create.
    fn put(
        &self,
        record: BlobRecord,
        size_hint_gib: f64,
        require_existing: bool,
    ) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");

        let reclaimed = match state.blobs.get(&record.key) {
            Some(existing) => existing.size_hint_gib,
            None if require_existing => {
                return Err(StoreError::NotFound(record.key));
            }
            None => 0.0,
        };

        if let Some(capacity) = self.capacity_gib {
            let available = capacity - (state.used_gib - reclaimed);
            if size_hint_gib > available {
                return Err(StoreError::CapacityExceeded {
                    requested_gib: size_hint_gib,
                    available_gib: available.max(0.0),
                });
            }
        }

        state.used_gib = state.used_gib - reclaimed + size_hint_gib;
        state.blobs.insert(
            record.key,
            StoredBlob {
                type_tag: record.type_tag,
                bytes: record.bytes,
                size_hint_gib,
            },
        );
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn retrieve(&self, key: &str) -> StoreResult<Option<Bytes>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.blobs.get(key).map(|blob| blob.bytes.clone()))
    }

    async fn create(&self, record: BlobRecord, size_hint_gib: f64) -> StoreResult<()> {
        self.put(record, size_hint_gib, false)
    }

    async fn update(&self, record: BlobRecord, size_hint_gib: f64) -> StoreResult<()> {
        self.put(record, size_hint_gib, true)
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        if let Some(removed) = state.blobs.remove(key) {
            state.used_gib -= removed.size_hint_gib;
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        // Acquiring the read lock proves the store is not wedged.
        let _state = self.state.read().expect("lock poisoned");
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().expect("lock poisoned");
        f.debug_struct("MemoryStore")
            .field("blob_count", &state.blobs.len())
            .field("used_gib", &state.used_gib)
            .field("capacity_gib", &self.capacity_gib)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, bytes: &[u8]) -> BlobRecord {
        BlobRecord::new(key, "bin", bytes.to_vec())
    }

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_and_retrieve() {
        let store = MemoryStore::new();
        let rec = record("a.bin", b"hello");
        store.create(rec.clone(), rec.size_hint_gib()).await.unwrap();

        let bytes = store.retrieve("a.bin").await.unwrap().expect("should exist");
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn retrieve_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.retrieve("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_overwrites_existing() {
        let store = MemoryStore::new();
        store.create(record("k", b"old"), 0.0).await.unwrap();
        store.create(record("k", b"new"), 0.0).await.unwrap();

        let bytes = store.retrieve("k").await.unwrap().unwrap();
        assert_eq!(&bytes[..], b"new");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_requires_existing_key() {
        let store = MemoryStore::new();
        let err = store.update(record("ghost", b"x"), 0.0).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(key) if key == "ghost"));
    }

    #[tokio::test]
    async fn update_replaces_content() {
        let store = MemoryStore::new();
        store.create(record("k", b"v1"), 0.0).await.unwrap();
        store.update(record("k", b"v2"), 0.0).await.unwrap();

        let bytes = store.retrieve("k").await.unwrap().unwrap();
        assert_eq!(&bytes[..], b"v2");
    }

    #[tokio::test]
    async fn delete_present_and_absent() {
        let store = MemoryStore::new();
        store.create(record("k", b"v"), 0.0).await.unwrap();

        store.delete("k").await.unwrap();
        assert!(store.retrieve("k").await.unwrap().is_none());

        // Second delete is a no-op success.
        store.delete("k").await.unwrap();
    }

    // -----------------------------------------------------------------------
    // Type tags
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn stores_type_tag() {
        let store = MemoryStore::new();
        let rec = BlobRecord::new("notes.txt", "txt", b"text".to_vec());
        store.create(rec, 0.0).await.unwrap();

        assert_eq!(store.type_tag_of("notes.txt").as_deref(), Some("txt"));
        assert_eq!(store.type_tag_of("missing"), None);
    }

    // -----------------------------------------------------------------------
    // Capacity budget
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn capacity_rejects_oversized_write() {
        let store = MemoryStore::with_capacity_gib(1.0);
        let err = store.create(record("big", b"x"), 1.5).await.unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { .. }));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn capacity_accumulates_across_blobs() {
        let store = MemoryStore::with_capacity_gib(1.0);
        store.create(record("a", b"x"), 0.6).await.unwrap();
        store.create(record("b", b"x"), 0.3).await.unwrap();

        let err = store.create(record("c", b"x"), 0.2).await.unwrap_err();
        match err {
            StoreError::CapacityExceeded { available_gib, .. } => {
                assert!((available_gib - 0.1).abs() < 1e-9);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn overwrite_reclaims_previous_hint() {
        let store = MemoryStore::with_capacity_gib(1.0);
        store.create(record("a", b"x"), 0.9).await.unwrap();
        // Overwriting the same key frees its old budget first.
        store.create(record("a", b"y"), 0.8).await.unwrap();
    }

    #[tokio::test]
    async fn delete_releases_budget() {
        let store = MemoryStore::with_capacity_gib(1.0);
        store.create(record("a", b"x"), 0.9).await.unwrap();
        store.delete("a").await.unwrap();
        store.create(record("b", b"y"), 0.9).await.unwrap();
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn len_total_bytes_and_clear() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.create(record("a", b"12345"), 0.0).await.unwrap();
        store.create(record("b", b"123456789"), 0.0).await.unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_bytes(), 14);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.total_bytes(), 0);
    }

    #[tokio::test]
    async fn health_check_succeeds() {
        let store = MemoryStore::new();
        store.health_check().await.unwrap();
    }

    #[test]
    fn default_creates_empty_store() {
        let store = MemoryStore::default();
        assert!(store.is_empty());
    }

    #[test]
    fn debug_format() {
        let store = MemoryStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("MemoryStore"));
        assert!(debug.contains("blob_count"));
    }

    // -----------------------------------------------------------------------
    // Concurrent read safety
    // -----------------------------------------------------------------------

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reads_are_safe() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let rec = record("shared", b"shared data");
        store.create(rec, 0.0).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let bytes = store.retrieve("shared").await.unwrap().unwrap();
                    assert_eq!(&bytes[..], b"shared data");
                })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task should not panic");
        }
    }
}
