use cask_lock::AcquireTimeout;
use cask_store::StoreError;

/// Errors surfaced by gateway operations.
///
/// Backend failures are passed through with the store's own message verbatim;
/// the gateway never wraps, classifies, or retries them.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The caller supplied an empty key.
    #[error("key must not be empty")]
    EmptyKey,

    /// Fetch of a key with no stored content.
    #[error("blob not found: {key}")]
    NotFound { key: String },

    /// Any failure from the underlying store, message carried verbatim.
    #[error("{detail}")]
    Backend { detail: String },

    /// Lock acquisition exceeded the configured deadline.
    ///
    /// Only produced when [`GatewayOptions::lock_timeout`] is set; by
    /// default the gateway waits without bound.
    ///
    /// [`GatewayOptions::lock_timeout`]: crate::gateway::GatewayOptions::lock_timeout
    #[error("timed out waiting for lock on key: {key}")]
    Timeout { key: String },
}

impl GatewayError {
    /// Creates a `NotFound` error for the given key.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a `Backend` error carrying `detail` verbatim.
    pub fn backend(detail: impl Into<String>) -> Self {
        Self::Backend {
            detail: detail.into(),
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        Self::Backend {
            detail: err.to_string(),
        }
    }
}

impl From<AcquireTimeout> for GatewayError {
    fn from(err: AcquireTimeout) -> Self {
        Self::Timeout { key: err.key }
    }
}

/// Result alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_is_verbatim() {
        let store_err = StoreError::NotFound("a.bin".into());
        let expected = store_err.to_string();
        let err = GatewayError::from(store_err);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn timeout_carries_key() {
        let err = GatewayError::from(AcquireTimeout { key: "k".into() });
        assert!(matches!(err, GatewayError::Timeout { key } if key == "k"));
    }
}
