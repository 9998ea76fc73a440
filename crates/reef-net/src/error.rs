//! Error types for provider network operations.

use reef_types::{Cid, PeerId};

/// Errors that can occur during provider network operations.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// The peer could not be reached at all.
    #[error("peer {peer} is unreachable")]
    PeerUnreachable {
        /// The peer that failed to respond.
        peer: PeerId,
    },

    /// The peer responded but does not hold the requested identifier.
    #[error("{cid} not found on peer {peer}")]
    NotFoundOnPeer {
        /// The peer that was asked.
        peer: PeerId,
        /// The identifier that was requested.
        cid: Cid,
    },

    /// The provider lookup itself failed (distinct from finding nobody,
    /// which is an empty result, not an error).
    #[error("provider lookup failed for {cid}: {reason}")]
    Lookup {
        /// The identifier being looked up.
        cid: Cid,
        /// Transport-level failure description.
        reason: String,
    },

    /// Announcing this node as a provider failed.
    #[error("advertise failed for {cid}: {reason}")]
    Advertise {
        /// The identifier being advertised.
        cid: Cid,
        /// Transport-level failure description.
        reason: String,
    },

    /// A peer refused a replication instruction.
    #[error("replication of {cid} refused by {peer}")]
    ReplicationRefused {
        /// The peer that refused.
        peer: PeerId,
        /// The identifier to replicate.
        cid: Cid,
    },
}
