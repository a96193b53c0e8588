use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use cask_lock::{KeyGuard, KeyLockRegistry};
use cask_store::{BlobRecord, BlobStore};

use crate::error::{GatewayError, GatewayResult};
use crate::media;

// ---------------------------------------------------------------------------
// GatewayOptions
// ---------------------------------------------------------------------------

/// Tuning knobs for a [`BlobGateway`].
///
/// Defaults: unbounded lock waits, unsynchronized remove.
#[derive(Clone, Debug, Default)]
pub struct GatewayOptions {
    /// Bound on the wait for a contended key lock. `None` waits forever;
    /// `Some` turns an expired wait into [`GatewayError::Timeout`].
    pub lock_timeout: Option<Duration>,

    /// Route remove through the same lock-acquisition path as the other
    /// operations.
    ///
    /// Off by default: a remove may run concurrently with an in-flight
    /// fetch/store/replace on the same key, so a store can land after a
    /// remove that was issued later, and a fetch can observe a delete
    /// mid-flight. Turning this on closes that race.
    pub serialized_remove: bool,
}

// ---------------------------------------------------------------------------
// FetchedBlob
// ---------------------------------------------------------------------------

/// A successful fetch: the blob's bytes plus a content type sniffed from
/// them.
#[derive(Clone, Debug)]
pub struct FetchedBlob {
    /// The blob content, byte-for-byte as stored.
    pub bytes: Bytes,
    /// Label derived from the leading bytes, not from the key's extension.
    pub content_type: &'static str,
}

// ---------------------------------------------------------------------------
// BlobGateway
// ---------------------------------------------------------------------------

/// Serializes blob operations per key over a pluggable [`BlobStore`].
///
/// Fetch, store, and replace hold the key's lock for the full span of the
/// backend call, so two of them targeting the same key never overlap;
/// operations on different keys run fully in parallel. The guard releases on
/// every exit path, including panic unwind inside the backend.
///
/// Remove skips the lock unless [`GatewayOptions::serialized_remove`] says
/// otherwise.
pub struct BlobGateway {
    store: Arc<dyn BlobStore>,
    locks: KeyLockRegistry,
    options: GatewayOptions,
}

impl BlobGateway {
    /// Wrap a store with default options.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self::with_options(store, GatewayOptions::default())
    }

    /// Wrap a store with explicit options.
    pub fn with_options(store: Arc<dyn BlobStore>, options: GatewayOptions) -> Self {
        Self {
            store,
            locks: KeyLockRegistry::new(),
            options,
        }
    }

    /// The active options.
    pub fn options(&self) -> &GatewayOptions {
        &self.options
    }

    /// The per-key lock table, exposed for diagnostics and pruning.
    pub fn locks(&self) -> &KeyLockRegistry {
        &self.locks
    }

    /// Read a blob and classify its content.
    ///
    /// Absent keys and zero-length content both report
    /// [`GatewayError::NotFound`]; the lock is held across the whole
    /// retrieve-and-classify window so a concurrent store cannot interleave
    /// a partial write with this read.
    pub async fn fetch(&self, key: &str) -> GatewayResult<FetchedBlob> {
        require_key(key)?;
        let _guard = self.acquire(key).await?;

        match self.store.retrieve(key).await? {
            Some(bytes) if !bytes.is_empty() => {
                let content_type = media::sniff_content_type(&bytes);
                Ok(FetchedBlob {
                    bytes,
                    content_type,
                })
            }
            _ => {
                tracing::debug!(key, "fetch of absent blob");
                Err(GatewayError::not_found(key))
            }
        }
    }

    /// Write a blob, overwriting any existing content under the key.
    ///
    /// The record's type tag comes from the key's extension, falling back to
    /// [`media::FALLBACK_TYPE_TAG`]. A backend failure surfaces verbatim as
    /// [`GatewayError::Backend`]; there are no retries.
    pub async fn store(&self, key: &str, bytes: Bytes) -> GatewayResult<()> {
        require_key(key)?;
        let _guard = self.acquire(key).await?;

        let record = BlobRecord::new(key, media::type_tag(key), bytes);
        let size_hint = record.size_hint_gib();
        tracing::debug!(key, bytes = record.len(), "storing blob");
        self.store.create(record, size_hint).await?;
        Ok(())
    }

    /// Replace the content of an existing blob.
    ///
    /// Same contract as [`store`](Self::store) but routed to the backend's
    /// update path; whether a missing key is an error is the backend's call.
    pub async fn replace(&self, key: &str, bytes: Bytes) -> GatewayResult<()> {
        require_key(key)?;
        let _guard = self.acquire(key).await?;

        let record = BlobRecord::new(key, media::type_tag(key), bytes);
        let size_hint = record.size_hint_gib();
        tracing::debug!(key, bytes = record.len(), "replacing blob");
        self.store.update(record, size_hint).await?;
        Ok(())
    }

    /// Delete a blob.
    ///
    /// By default this does NOT acquire the key's lock: the delete is
    /// unordered with respect to in-flight operations on the same key.
    /// [`GatewayOptions::serialized_remove`] restores the same-key ordering
    /// invariant.
    pub async fn remove(&self, key: &str) -> GatewayResult<()> {
        require_key(key)?;
        let _guard = if self.options.serialized_remove {
            Some(self.acquire(key).await?)
        } else {
            None
        };

        tracing::debug!(key, "removing blob");
        self.store.delete(key).await?;
        Ok(())
    }

    async fn acquire(&self, key: &str) -> GatewayResult<KeyGuard> {
        match self.options.lock_timeout {
            Some(limit) => Ok(self.locks.acquire_timeout(key, limit).await?),
            None => Ok(self.locks.acquire(key).await),
        }
    }
}

fn require_key(key: &str) -> GatewayResult<()> {
    if key.is_empty() {
        return Err(GatewayError::EmptyKey);
    }
    Ok(())
}
