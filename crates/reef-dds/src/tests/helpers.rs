//! Shared test utilities for reef-dds tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use reef_net::InMemoryProviderService;
use reef_store::{ChunkStore, MemoryStore, StoreError};
use reef_types::PeerId;

use crate::publisher::{PublishReceipt, Publisher};
use crate::retriever::Retriever;

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

/// A single-node pipeline: publisher and retriever sharing one store and
/// one provider stub.
pub struct TestPipeline {
    pub publisher: Publisher,
    pub retriever: Retriever,
    pub store: Arc<MemoryStore>,
    pub provider: Arc<InMemoryProviderService>,
}

/// Build a pipeline over an in-memory store and provider stub.
pub fn pipeline(chunk_size: u32) -> TestPipeline {
    let store = Arc::new(MemoryStore::new());
    let provider = Arc::new(InMemoryProviderService::new(PeerId::new("local-node")));
    let publisher = Publisher::new(store.clone(), provider.clone(), chunk_size).unwrap();
    let retriever = Retriever::new(store.clone(), provider.clone());
    TestPipeline {
        publisher,
        retriever,
        store,
        provider,
    }
}

/// Copy everything a publish wrote into a peer's seeded data on the
/// provider stub, registering the peer as provider for each identifier.
///
/// Models a remote node that already holds the content.
pub async fn seed_remote_from(
    store: &MemoryStore,
    provider: &InMemoryProviderService,
    peer: &PeerId,
    receipt: &PublishReceipt,
) {
    let manifest_bytes = store.get(receipt.manifest_cid.as_str()).await.unwrap();
    provider.seed_peer_data(peer, &receipt.manifest_cid, manifest_bytes);
    provider.register_provider(&receipt.manifest_cid, peer);

    for cid in &receipt.chunk_cids {
        let chunk_bytes = store.get(cid.as_str()).await.unwrap();
        provider.seed_peer_data(peer, cid, chunk_bytes);
        provider.register_provider(cid, peer);
    }
}

/// Store wrapper that fails the Nth `put` (zero-based) with an I/O error.
pub struct FailingStore {
    inner: MemoryStore,
    fail_at: usize,
    puts: AtomicUsize,
}

impl FailingStore {
    pub fn new(fail_at: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_at,
            puts: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl ChunkStore for FailingStore {
    async fn put(&self, cid: &str, data: Bytes) -> Result<(), StoreError> {
        let n = self.puts.fetch_add(1, Ordering::SeqCst);
        if n == self.fail_at {
            return Err(StoreError::Io(std::io::Error::other("injected put failure")));
        }
        self.inner.put(cid, data).await
    }

    async fn get(&self, cid: &str) -> Result<Bytes, StoreError> {
        self.inner.get(cid).await
    }

    async fn contains(&self, cid: &str) -> Result<bool, StoreError> {
        self.inner.contains(cid).await
    }

    async fn delete(&self, cid: &str) -> Result<(), StoreError> {
        self.inner.delete(cid).await
    }

    fn locate(&self, cid: &str) -> Result<String, StoreError> {
        self.inner.locate(cid)
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        self.inner.list().await
    }
}

/// Store whose writes always fail while reads behave normally. Used to
/// show that opportunistic cache write-back failures are not fatal.
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

#[async_trait::async_trait]
impl ChunkStore for ReadOnlyStore {
    async fn put(&self, _cid: &str, _data: Bytes) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("store is read-only")))
    }

    async fn get(&self, cid: &str) -> Result<Bytes, StoreError> {
        self.inner.get(cid).await
    }

    async fn contains(&self, cid: &str) -> Result<bool, StoreError> {
        self.inner.contains(cid).await
    }

    async fn delete(&self, cid: &str) -> Result<(), StoreError> {
        self.inner.delete(cid).await
    }

    fn locate(&self, cid: &str) -> Result<String, StoreError> {
        self.inner.locate(cid)
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        self.inner.list().await
    }
}
