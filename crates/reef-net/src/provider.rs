//! The provider-discovery interface the core consumes.

use bytes::Bytes;
use reef_types::{Cid, PeerId};

use crate::error::NetError;

/// Abstraction over the network layer that locates and transfers content
/// by identifier.
///
/// Publishers and retrievers receive an implementation at construction
/// time. Only `advertise`, `find_providers`, and `fetch` sit on the
/// critical publish/retrieve path; `store_remote` and
/// `instruct_replication` support replication workflows.
#[async_trait::async_trait]
pub trait ProviderService: Send + Sync {
    /// Announce this node as a provider of `cid`.
    ///
    /// Idempotent per (self, cid).
    async fn advertise(&self, cid: &Cid) -> Result<(), NetError>;

    /// Return the peers known to provide `cid`.
    ///
    /// An empty list is a valid answer, not an error.
    async fn find_providers(&self, cid: &Cid) -> Result<Vec<PeerId>, NetError>;

    /// Fetch the raw bytes for `cid` from a named peer.
    ///
    /// The caller is responsible for verifying that the returned bytes
    /// hash back to `cid`.
    async fn fetch(&self, peer: &PeerId, cid: &Cid) -> Result<Bytes, NetError>;

    /// Ask a peer to store bytes under `cid`.
    async fn store_remote(&self, peer: &PeerId, cid: &Cid, data: Bytes) -> Result<(), NetError>;

    /// Ask `target` to replicate `cid`, pulling from `source`.
    async fn instruct_replication(
        &self,
        target: &PeerId,
        cid: &Cid,
        source: &PeerId,
    ) -> Result<(), NetError>;
}
