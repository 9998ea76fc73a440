//! Core trait and identifier sanitization for chunk storage.

use bytes::Bytes;

use crate::error::StoreError;

/// Reject identifiers that cannot safely name a storage entry.
///
/// An identifier becomes a file name in the on-disk backend, so anything
/// that could escape the base directory is refused: empty strings, path
/// separators, and `..`. Well-formed Base58BTC identifiers always pass.
pub fn sanitize_cid(cid: &str) -> Result<&str, StoreError> {
    if cid.trim().is_empty() {
        return Err(StoreError::InvalidId(cid.to_string()));
    }
    if cid.contains('/') || cid.contains('\\') || cid.contains("..") {
        return Err(StoreError::InvalidId(cid.to_string()));
    }
    Ok(cid)
}

/// Trait for storing and retrieving content-addressed entries.
///
/// A store is a persistent mapping from identifier to bytes. Writes for a
/// key are mutually exclusive with reads and writes for the same store;
/// concurrent readers may proceed in parallel. A `put` either leaves the
/// prior value intact or installs the new one — torn writes are never
/// observable through `get`.
///
/// All implementations must be `Send + Sync` for use across async tasks.
/// Data moves as [`Bytes`] for cheap cloning along the pipeline.
#[async_trait::async_trait]
pub trait ChunkStore: Send + Sync {
    /// Store bytes under an identifier, overwriting any existing entry.
    ///
    /// Empty bytes are valid content. Fails with [`StoreError::InvalidId`]
    /// for unusable identifiers.
    async fn put(&self, cid: &str, data: Bytes) -> Result<(), StoreError>;

    /// Retrieve the bytes stored under an identifier.
    ///
    /// Fails with [`StoreError::NotFound`] when absent.
    async fn get(&self, cid: &str) -> Result<Bytes, StoreError>;

    /// Check whether an identifier has an entry.
    async fn contains(&self, cid: &str) -> Result<bool, StoreError>;

    /// Delete the entry for an identifier.
    ///
    /// Fails with [`StoreError::NotFound`] when absent. Deletion is
    /// advisory — peers may still hold copies.
    async fn delete(&self, cid: &str) -> Result<(), StoreError>;

    /// Return a diagnostic description of where an identifier would be
    /// stored (a file path for disk-backed stores).
    fn locate(&self, cid: &str) -> Result<String, StoreError>;

    /// List all stored identifiers.
    async fn list(&self) -> Result<Vec<String>, StoreError>;
}
