/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested blob does not exist (update of an absent key).
    #[error("blob not found: {0}")]
    NotFound(String),

    /// The write would exceed the backend's capacity budget.
    #[error(
        "capacity exceeded: write of {requested_gib:.6} GiB, {available_gib:.6} GiB available"
    )]
    CapacityExceeded {
        requested_gib: f64,
        available_gib: f64,
    },

    /// Driver- or connection-level failure from the underlying store.
    #[error("backend failure: {0}")]
    Backend(String),

    /// I/O error from a filesystem-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
