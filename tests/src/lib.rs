//! Shared test harness for Reef end-to-end scenarios.
//!
//! Provides a single-node pipeline over in-memory backends, plus a
//! two-node setup where an "edge" node with an empty local store pulls
//! everything an "origin" node published through the provider service.

use std::sync::Arc;

use reef_dds::{PublishReceipt, Publisher, Retriever};
use reef_net::InMemoryProviderService;
use reef_store::{ChunkStore, MemoryStore};
use reef_types::PeerId;

/// Generate deterministic, non-repeating test data.
pub fn test_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..size {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }
    data
}

/// A single node: publisher and retriever over one store and provider.
pub struct Node {
    pub publisher: Publisher,
    pub retriever: Retriever,
    pub store: Arc<MemoryStore>,
    pub provider: Arc<InMemoryProviderService>,
}

/// Build a single-node pipeline over in-memory backends.
pub fn single_node(chunk_size: u32) -> Node {
    let store = Arc::new(MemoryStore::new());
    let provider = Arc::new(InMemoryProviderService::new(PeerId::new("node-1")));
    let publisher = Publisher::new(store.clone(), provider.clone(), chunk_size).unwrap();
    let retriever = Retriever::new(store.clone(), provider.clone());
    Node {
        publisher,
        retriever,
        store,
        provider,
    }
}

/// Copy everything a publish wrote on `origin` into `peer`'s served data
/// on `provider`, registering the peer for each identifier.
pub async fn share_receipt(
    origin: &MemoryStore,
    provider: &InMemoryProviderService,
    peer: &PeerId,
    receipt: &PublishReceipt,
) {
    let manifest_bytes = origin.get(receipt.manifest_cid.as_str()).await.unwrap();
    provider.seed_peer_data(peer, &receipt.manifest_cid, manifest_bytes);
    provider.register_provider(&receipt.manifest_cid, peer);

    for cid in &receipt.chunk_cids {
        let chunk = origin.get(cid.as_str()).await.unwrap();
        provider.seed_peer_data(peer, cid, chunk);
        provider.register_provider(cid, peer);
    }
}
