//! Error types for content addressing operations.

/// Errors that can occur during chunking and manifest handling.
#[derive(Debug, thiserror::Error)]
pub enum CasError {
    /// The configured chunk size was zero.
    #[error("chunk size must be positive")]
    InvalidChunkSize,

    /// A manifest for non-empty content listed no chunks.
    #[error("non-empty content ({total_size} bytes) must list at least one chunk")]
    MissingChunks {
        /// Declared size of the original content.
        total_size: u64,
    },

    /// A manifest for zero-byte content listed chunks.
    #[error("zero-byte content must list no chunks, found {count}")]
    UnexpectedChunks {
        /// Number of chunk identifiers found.
        count: usize,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Manifest has an unsupported version.
    #[error("unsupported manifest version {found}, this node supports version {supported}")]
    UnsupportedVersion {
        /// Version found in the manifest.
        found: u8,
        /// Version this node supports.
        supported: u8,
    },
}
