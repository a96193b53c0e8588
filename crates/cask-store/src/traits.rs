use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreResult;
use crate::record::BlobRecord;

/// Key-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - `retrieve` reports an absent key as `Ok(None)`, never as an error.
/// - `create` inserts or overwrites; it never fails because a key exists.
/// - `update` requires the key to already exist; the existence check is the
///   backend's responsibility, not the caller's.
/// - `delete` of an absent key succeeds without effect.
/// - The store never interprets blob contents -- it is a pure key-value store.
/// - The size hint accompanying each write is expressed in gibibytes
///   (bytes / 2^30); backends with quota logic depend on that unit.
///
/// The trait says nothing about cross-key or same-key ordering. Callers that
/// need serialized access to a key must arrange it themselves; the gateway
/// layer does exactly that.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read a blob's bytes by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    async fn retrieve(&self, key: &str) -> StoreResult<Option<Bytes>>;

    /// Write a new blob, overwriting any existing content under the key.
    async fn create(&self, record: BlobRecord, size_hint_gib: f64) -> StoreResult<()>;

    /// Replace the content of an existing blob.
    ///
    /// Returns an error if the key does not exist.
    async fn update(&self, record: BlobRecord, size_hint_gib: f64) -> StoreResult<()>;

    /// Remove a blob by key. Succeeds even if the key is absent.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Verify the store is reachable and accepting operations.
    async fn health_check(&self) -> StoreResult<()>;
}
