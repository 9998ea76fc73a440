//! In-memory provider service for tests and single-node operation.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use bytes::Bytes;
use reef_types::{Cid, PeerId};
use tracing::debug;

use crate::error::NetError;
use crate::provider::ProviderService;

#[derive(Default)]
struct Inner {
    /// cid → peers advertising it, in registration order.
    providers: HashMap<Cid, Vec<PeerId>>,
    /// Per-peer content, keyed by peer then cid.
    peer_data: HashMap<PeerId, HashMap<Cid, Bytes>>,
    /// Peers that fail every operation.
    unreachable: HashSet<PeerId>,
    /// Identifiers whose provider lookup fails outright.
    lookup_fails: HashSet<Cid>,
    /// Peers that refuse replication instructions.
    refuses_replication: HashSet<PeerId>,
    /// When set, `advertise` fails (publishes must survive this).
    advertise_fails: bool,
}

/// Provider service backed by in-memory maps.
///
/// Serves `find_providers` from a registration table and `fetch` from
/// per-peer content maps. Failure injection — unreachable peers, failing
/// advertisements — lets tests exercise every branch of the retrieval
/// fallback logic without a transport.
pub struct InMemoryProviderService {
    self_peer: PeerId,
    inner: RwLock<Inner>,
}

impl InMemoryProviderService {
    /// Create a stub whose local node advertises as `self_peer`.
    pub fn new(self_peer: PeerId) -> Self {
        Self {
            self_peer,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// The peer identifier this node advertises under.
    pub fn self_peer(&self) -> &PeerId {
        &self.self_peer
    }

    /// Register `peer` as a provider of `cid`.
    pub fn register_provider(&self, cid: &Cid, peer: &PeerId) {
        let mut inner = self.inner.write().expect("lock poisoned");
        let peers = inner.providers.entry(cid.clone()).or_default();
        if !peers.contains(peer) {
            peers.push(peer.clone());
        }
    }

    /// Remove every provider registration for `cid`.
    pub fn clear_providers(&self, cid: &Cid) {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.providers.remove(cid);
    }

    /// Return the registered providers of `cid` (test inspection).
    pub fn providers_of(&self, cid: &Cid) -> Vec<PeerId> {
        let inner = self.inner.read().expect("lock poisoned");
        inner.providers.get(cid).cloned().unwrap_or_default()
    }

    /// Seed content held by a peer, served by later `fetch` calls.
    pub fn seed_peer_data(&self, peer: &PeerId, cid: &Cid, data: Bytes) {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner
            .peer_data
            .entry(peer.clone())
            .or_default()
            .insert(cid.clone(), data);
    }

    /// Mark a peer as unreachable: every operation against it fails.
    pub fn set_unreachable(&self, peer: &PeerId) {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.unreachable.insert(peer.clone());
    }

    /// Make provider lookups for `cid` fail outright.
    pub fn fail_lookup(&self, cid: &Cid) {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.lookup_fails.insert(cid.clone());
    }

    /// Make a peer refuse replication instructions.
    pub fn set_refuses_replication(&self, peer: &PeerId) {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.refuses_replication.insert(peer.clone());
    }

    /// Make subsequent `advertise` calls fail (or succeed again).
    pub fn fail_advertise(&self, fail: bool) {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.advertise_fails = fail;
    }
}

#[async_trait::async_trait]
impl ProviderService for InMemoryProviderService {
    async fn advertise(&self, cid: &Cid) -> Result<(), NetError> {
        let mut inner = self.inner.write().expect("lock poisoned");
        if inner.advertise_fails {
            return Err(NetError::Advertise {
                cid: cid.clone(),
                reason: "injected advertise failure".to_string(),
            });
        }
        let self_peer = self.self_peer.clone();
        let peers = inner.providers.entry(cid.clone()).or_default();
        if !peers.contains(&self_peer) {
            peers.push(self_peer);
        }
        debug!(%cid, "advertised as provider");
        Ok(())
    }

    async fn find_providers(&self, cid: &Cid) -> Result<Vec<PeerId>, NetError> {
        let inner = self.inner.read().expect("lock poisoned");
        if inner.lookup_fails.contains(cid) {
            return Err(NetError::Lookup {
                cid: cid.clone(),
                reason: "injected lookup failure".to_string(),
            });
        }
        Ok(inner.providers.get(cid).cloned().unwrap_or_default())
    }

    async fn fetch(&self, peer: &PeerId, cid: &Cid) -> Result<Bytes, NetError> {
        let inner = self.inner.read().expect("lock poisoned");
        if inner.unreachable.contains(peer) {
            return Err(NetError::PeerUnreachable { peer: peer.clone() });
        }
        inner
            .peer_data
            .get(peer)
            .and_then(|entries| entries.get(cid))
            .cloned()
            .ok_or_else(|| NetError::NotFoundOnPeer {
                peer: peer.clone(),
                cid: cid.clone(),
            })
    }

    async fn store_remote(&self, peer: &PeerId, cid: &Cid, data: Bytes) -> Result<(), NetError> {
        let mut inner = self.inner.write().expect("lock poisoned");
        if inner.unreachable.contains(peer) {
            return Err(NetError::PeerUnreachable { peer: peer.clone() });
        }
        inner
            .peer_data
            .entry(peer.clone())
            .or_default()
            .insert(cid.clone(), data);
        debug!(%peer, %cid, "stored entry on remote peer");
        Ok(())
    }

    async fn instruct_replication(
        &self,
        target: &PeerId,
        cid: &Cid,
        source: &PeerId,
    ) -> Result<(), NetError> {
        let mut inner = self.inner.write().expect("lock poisoned");
        if inner.unreachable.contains(target) {
            return Err(NetError::PeerUnreachable {
                peer: target.clone(),
            });
        }
        if inner.refuses_replication.contains(target) {
            return Err(NetError::ReplicationRefused {
                peer: target.clone(),
                cid: cid.clone(),
            });
        }
        let data = inner
            .peer_data
            .get(source)
            .and_then(|entries| entries.get(cid))
            .cloned()
            .ok_or_else(|| NetError::NotFoundOnPeer {
                peer: source.clone(),
                cid: cid.clone(),
            })?;
        inner
            .peer_data
            .entry(target.clone())
            .or_default()
            .insert(cid.clone(), data);
        debug!(%target, %source, %cid, "replicated entry between peers");
        Ok(())
    }
}
