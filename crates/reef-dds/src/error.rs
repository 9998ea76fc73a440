//! Error types for the publish/retrieve pipeline.
//!
//! Kinds are compared by variant identity, never by message text.
//! [`ManifestRetrieval`](DdsError::ManifestRetrieval) and
//! [`ChunkRetrieval`](DdsError::ChunkRetrieval) wrap the underlying
//! failure so callers can distinguish "the manifest itself is
//! unreachable" from "a chunk of a known manifest is unreachable".

use reef_cas::CasError;
use reef_net::NetError;
use reef_store::StoreError;
use reef_types::Cid;

/// Errors that can occur during publish and retrieve operations.
#[derive(Debug, thiserror::Error)]
pub enum DdsError {
    /// A caller-supplied argument was unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Writing a chunk during publish failed. Publish is best-effort
    /// atomic: earlier chunks stay on disk, the manifest is never written.
    #[error("failed to store chunk {index} ({cid}): {source}")]
    ChunkStore {
        /// Zero-based index of the failing chunk.
        index: usize,
        /// Identifier of the failing chunk.
        cid: Cid,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// The local chunk store failed outside the chunk-write loop.
    #[error("storage failure for {cid}: {source}")]
    Storage {
        /// Identifier being stored or read.
        cid: Cid,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// Manifest encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] CasError),

    /// The provider network failed below the retry loop.
    #[error(transparent)]
    Network(#[from] NetError),

    /// Provider lookup returned nobody.
    #[error("no providers found for {cid}")]
    NoProviders {
        /// The identifier nobody provides.
        cid: Cid,
    },

    /// Every returned provider failed to deliver the bytes.
    #[error("all {attempted} providers failed for {cid}")]
    ProvidersExhausted {
        /// The identifier that could not be fetched.
        cid: Cid,
        /// Number of providers attempted.
        attempted: usize,
    },

    /// The manifest could not be fetched from cache or network.
    #[error("failed to retrieve manifest {cid}: {source}")]
    ManifestRetrieval {
        /// The manifest identifier.
        cid: Cid,
        /// Why the fetch failed.
        #[source]
        source: Box<DdsError>,
    },

    /// A chunk of a known manifest could not be fetched.
    #[error("failed to retrieve chunk {cid}: {source}")]
    ChunkRetrieval {
        /// The chunk identifier.
        cid: Cid,
        /// Why the fetch failed.
        #[source]
        source: Box<DdsError>,
    },

    /// Fetched chunk bytes did not hash back to their identifier.
    #[error("chunk verification failed: {expected} hashed to {actual}")]
    ChunkVerification {
        /// The identifier the chunk was fetched under.
        expected: Cid,
        /// What the fetched bytes actually hash to.
        actual: Cid,
    },

    /// Reassembled content did not hash to the manifest's declared
    /// original-content hash.
    #[error("content verification failed: manifest declares {expected}, data hashes to {actual}")]
    ContentVerification {
        /// The manifest's declared original-content hash.
        expected: Cid,
        /// What the reassembled bytes actually hash to.
        actual: Cid,
    },

    /// The operation's cancellation context fired.
    #[error("operation cancelled")]
    Cancelled,
}
