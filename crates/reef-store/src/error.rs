//! Error types for chunk storage operations.

/// Errors that can occur during chunk storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested identifier was not found in this store.
    #[error("identifier not found in store: {0}")]
    NotFound(String),

    /// The identifier is unusable as a storage key (empty, or containing
    /// path separators or `..`).
    #[error("invalid identifier for storage: {0:?}")]
    InvalidId(String),

    /// An I/O error occurred.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
