//! End-to-end publish/retrieve scenarios, including the on-disk store.

use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use reef_dds::{DdsError, Publisher, Retriever};
use reef_integration_tests::{share_receipt, single_node, test_data};
use reef_net::InMemoryProviderService;
use reef_store::{ChunkStore, FileStore, MemoryStore};
use reef_types::{Cid, PeerId};

#[tokio::test]
#[ntest::timeout(20000)]
async fn tiny_publish_retrieve_roundtrip() {
    let node = single_node(4);

    let receipt = node
        .publisher
        .publish(b"hello", None, None, BTreeMap::new())
        .await
        .unwrap();

    assert_eq!(receipt.chunk_cids.len(), 2);
    assert_eq!(receipt.manifest.total_size, 5);

    let (data, _) = node.retriever.retrieve(&receipt.manifest_cid).await.unwrap();
    assert_eq!(data, b"hello");
}

#[tokio::test]
#[ntest::timeout(20000)]
async fn zero_byte_content_flows_end_to_end() {
    let node = single_node(262_144);

    let receipt = node
        .publisher
        .publish(b"", None, None, BTreeMap::new())
        .await
        .unwrap();
    assert!(receipt.chunk_cids.is_empty());
    assert_eq!(receipt.original_hash, Cid::of_empty());

    let (data, manifest) = node.retriever.retrieve(&receipt.manifest_cid).await.unwrap();
    assert!(data.is_empty());
    assert_eq!(manifest.total_size, 0);
}

#[tokio::test]
#[ntest::timeout(20000)]
async fn on_disk_chunk_tamper_is_detected() {
    // A publisher over the real file store; 600 bytes at chunk size 256
    // gives three chunks on disk.
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let provider = Arc::new(InMemoryProviderService::new(PeerId::new("disk-node")));
    let publisher = Publisher::new(store.clone(), provider.clone(), 256).unwrap();
    let retriever = Retriever::new(store.clone(), provider);

    let data = test_data(600);
    let receipt = publisher
        .publish(&data, None, None, BTreeMap::new())
        .await
        .unwrap();
    assert_eq!(receipt.chunk_cids.len(), 3);

    // Overwrite chunk 0's file with same-length garbage, bypassing the
    // store interface entirely.
    let victim = &receipt.chunk_cids[0];
    let path = store.locate(victim.as_str()).unwrap();
    let mut garbage = test_data(256);
    garbage.reverse();
    std::fs::write(&path, &garbage).unwrap();

    let err = retriever.retrieve(&receipt.manifest_cid).await.unwrap_err();
    match err {
        DdsError::ChunkVerification { expected, .. } => assert_eq!(expected, *victim),
        other => panic!("expected ChunkVerification, got {other:?}"),
    }
}

#[tokio::test]
#[ntest::timeout(20000)]
async fn manifest_hash_tamper_is_detected() {
    let node = single_node(64);
    let data = test_data(180);
    let receipt = node
        .publisher
        .publish(&data, None, None, BTreeMap::new())
        .await
        .unwrap();

    let mut doctored = receipt.manifest.clone();
    doctored.original_hash = Cid::from_data(b"wrong content entirely");
    let bytes = reef_cas::serialize_manifest(&doctored).unwrap();
    node.store
        .put(receipt.manifest_cid.as_str(), Bytes::from(bytes))
        .await
        .unwrap();

    let err = node.retriever.retrieve(&receipt.manifest_cid).await.unwrap_err();
    assert!(matches!(err, DdsError::ContentVerification { .. }));
}

#[tokio::test]
#[ntest::timeout(20000)]
async fn cache_then_network_retrieval() {
    // Origin publishes; edge starts with an empty store and one provider.
    let origin = single_node(64);
    let data = test_data(500);
    let receipt = origin
        .publisher
        .publish(&data, None, None, BTreeMap::new())
        .await
        .unwrap();

    let peer = PeerId::new("origin-peer");
    let provider = Arc::new(InMemoryProviderService::new(PeerId::new("edge-peer")));
    share_receipt(&origin.store, &provider, &peer, &receipt).await;

    let edge_store = Arc::new(MemoryStore::new());
    let edge = Retriever::new(edge_store.clone(), provider.clone());

    let (got, _) = edge.retrieve(&receipt.manifest_cid).await.unwrap();
    assert_eq!(got, data);

    // Everything is cached locally now; with providers gone, the second
    // retrieve still succeeds.
    provider.clear_providers(&receipt.manifest_cid);
    for cid in &receipt.chunk_cids {
        provider.clear_providers(cid);
        assert!(edge_store.contains(cid.as_str()).await.unwrap());
    }
    let (again, _) = edge.retrieve(&receipt.manifest_cid).await.unwrap();
    assert_eq!(again, data);
}

#[tokio::test]
#[ntest::timeout(20000)]
async fn config_wires_a_whole_node() {
    use reef_identity::Wallet;
    use reef_types::ReefConfig;

    let dir = tempfile::TempDir::new().unwrap();
    let config = ReefConfig {
        chunk_size: 128,
        storage_base_path: dir.path().join("chunks"),
        wallet_path: dir.path().join("wallet.json"),
    };

    // Wallet at the configured path.
    Wallet::generate().save(&config.wallet_path).unwrap();
    let wallet = Wallet::load(&config.wallet_path).unwrap();
    assert!(!wallet.address().unwrap().is_empty());

    // Store and pipeline from the configured values.
    let store = Arc::new(FileStore::new(&config.storage_base_path).unwrap());
    let provider = Arc::new(InMemoryProviderService::new(PeerId::new("cfg-node")));
    let publisher = Publisher::new(store.clone(), provider.clone(), config.chunk_size).unwrap();
    let retriever = Retriever::new(store, provider);

    let data = test_data(300);
    let receipt = publisher
        .publish(&data, None, None, BTreeMap::new())
        .await
        .unwrap();
    let (got, _) = retriever.retrieve(&receipt.manifest_cid).await.unwrap();
    assert_eq!(got, data);
    assert!(config.storage_base_path.exists());
}

#[tokio::test]
#[ntest::timeout(20000)]
async fn feed_resolves_dds_backed_posts() {
    use reef_feed::{ContentRecord, FeedAssembler, RecordKind};

    let node = single_node(64);
    let receipt = node
        .publisher
        .publish(b"a post stored off-record", None, None, BTreeMap::new())
        .await
        .unwrap();

    let store = node.store.clone();
    let provider = node.provider.clone();
    let assembler = FeedAssembler::new(Arc::new(Retriever::new(store, provider)));

    let records = vec![
        ContentRecord {
            id: "p-inline".to_string(),
            author: "did:reef:alice".to_string(),
            body: "inline body".to_string(),
            kind: RecordKind::Post,
            created_at: 100,
            tags: vec![],
        },
        ContentRecord {
            id: "p-dds".to_string(),
            author: "did:reef:bob".to_string(),
            body: receipt.manifest_cid.as_str().to_string(),
            kind: RecordKind::Post,
            created_at: 200,
            tags: vec![],
        },
    ];

    let feed = assembler.assemble(&records).await;
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].post_id, "p-dds");
    assert_eq!(feed[0].body, "a post stored off-record");
    assert_eq!(feed[1].body, "inline body");
}
