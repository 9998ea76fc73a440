//! The publish pipeline: chunk, store, manifest, advertise.

use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use reef_cas::{build_manifest, serialize_manifest, Chunker};
use reef_net::ProviderService;
use reef_store::ChunkStore;
use reef_types::{Cid, ContentManifest};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::DdsError;

/// Everything a successful publish produced.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    /// Identifier of the stored manifest.
    pub manifest_cid: Cid,
    /// Identifiers of the stored chunks, in content order.
    pub chunk_cids: Vec<Cid>,
    /// Identifier of the full, unchunked content.
    pub original_hash: Cid,
    /// The manifest itself.
    pub manifest: ContentManifest,
}

/// Publishes raw content into the distributed data store.
///
/// Chunk writes are best-effort atomic: if any write fails, the whole
/// publish fails, the error names the failing piece, and earlier writes
/// stay in place (they are self-consistent content-addressed entries).
/// The manifest is only written after every chunk landed. Advertisement
/// failures are logged and never fail a publish — the content remains
/// locally usable.
pub struct Publisher {
    store: Arc<dyn ChunkStore>,
    provider: Arc<dyn ProviderService>,
    chunker: Chunker,
}

impl Publisher {
    /// Create a publisher over a chunk store and provider service.
    ///
    /// Fails with [`DdsError::InvalidInput`] for a zero chunk size.
    pub fn new(
        store: Arc<dyn ChunkStore>,
        provider: Arc<dyn ProviderService>,
        chunk_size: u32,
    ) -> Result<Self, DdsError> {
        let chunker = Chunker::new(chunk_size)
            .map_err(|_| DdsError::InvalidInput("chunk size must be positive".to_string()))?;
        Ok(Self {
            store,
            provider,
            chunker,
        })
    }

    /// Publish content, returning the manifest identifier and the pieces
    /// that were written.
    pub async fn publish(
        &self,
        data: &[u8],
        mime_type: Option<String>,
        filename: Option<String>,
        metadata: BTreeMap<String, String>,
    ) -> Result<PublishReceipt, DdsError> {
        self.publish_with_cancel(&CancellationToken::new(), data, mime_type, filename, metadata)
            .await
    }

    /// Publish content under a cancellation context.
    ///
    /// On cancellation, chunks already written remain on disk under their
    /// correct identifiers; the manifest will not have been written.
    pub async fn publish_with_cancel(
        &self,
        cancel: &CancellationToken,
        data: &[u8],
        mime_type: Option<String>,
        filename: Option<String>,
        metadata: BTreeMap<String, String>,
    ) -> Result<PublishReceipt, DdsError> {
        info!(size = data.len(), "publishing content");

        let original_hash = Cid::from_data(data);
        let chunks = self.chunker.chunk(data);
        debug!(pieces = chunks.len(), "chunked content");

        let mut chunk_cids = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.into_iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(DdsError::Cancelled);
            }
            let cid = chunk.cid;
            self.store
                .put(cid.as_str(), Bytes::from(chunk.data))
                .await
                .map_err(|source| DdsError::ChunkStore {
                    index,
                    cid: cid.clone(),
                    source,
                })?;
            debug!(%cid, index, "stored chunk");
            chunk_cids.push(cid);
        }

        let manifest = build_manifest(
            chunk_cids.clone(),
            original_hash.clone(),
            data.len() as u64,
            mime_type,
            filename,
            metadata,
        )?;
        let manifest_bytes = serialize_manifest(&manifest)?;
        let manifest_cid = Cid::from_data(&manifest_bytes);

        if cancel.is_cancelled() {
            return Err(DdsError::Cancelled);
        }
        self.store
            .put(manifest_cid.as_str(), Bytes::from(manifest_bytes))
            .await
            .map_err(|source| DdsError::Storage {
                cid: manifest_cid.clone(),
                source,
            })?;
        debug!(%manifest_cid, "stored manifest");

        if let Err(e) = self.provider.advertise(&manifest_cid).await {
            warn!(cid = %manifest_cid, error = %e, "failed to advertise manifest, content is still locally usable");
        }
        for cid in &chunk_cids {
            if let Err(e) = self.provider.advertise(cid).await {
                warn!(%cid, error = %e, "failed to advertise chunk");
            }
        }

        info!(manifest = %manifest_cid, chunks = chunk_cids.len(), "published content");
        Ok(PublishReceipt {
            manifest_cid,
            chunk_cids,
            original_hash,
            manifest,
        })
    }
}
