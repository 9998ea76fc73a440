//! The retrieve pipeline: cache-first fetch, reassembly, verification.

use std::sync::Arc;

use bytes::Bytes;
use reef_cas::deserialize_manifest;
use reef_net::ProviderService;
use reef_store::{ChunkStore, StoreError};
use reef_types::{Cid, ContentManifest};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::DdsError;

/// Which kind of entry a fetch is for; decides how failures are wrapped.
#[derive(Clone, Copy)]
enum FetchKind {
    Manifest,
    Chunk,
}

impl FetchKind {
    fn as_str(self) -> &'static str {
        match self {
            FetchKind::Manifest => "manifest",
            FetchKind::Chunk => "chunk",
        }
    }
}

/// Resolves a manifest identifier into integrity-verified bytes.
///
/// Every fetch goes local-store-first, falling back to the provider
/// network: look up providers, try them in the order returned, and on the
/// first success opportunistically write the bytes back into the local
/// store (a failed write-back is logged, never fatal). Local reads are
/// trusted at the fetch layer — a corrupted local entry is still caught
/// by the chunk identifier check during reassembly.
pub struct Retriever {
    store: Arc<dyn ChunkStore>,
    provider: Arc<dyn ProviderService>,
}

impl Retriever {
    /// Create a retriever over a chunk store and provider service.
    pub fn new(store: Arc<dyn ChunkStore>, provider: Arc<dyn ProviderService>) -> Self {
        Self { store, provider }
    }

    /// Retrieve and verify the content behind a manifest identifier.
    pub async fn retrieve(
        &self,
        manifest_cid: &Cid,
    ) -> Result<(Vec<u8>, ContentManifest), DdsError> {
        self.retrieve_with_cancel(&CancellationToken::new(), manifest_cid)
            .await
    }

    /// Retrieve under a cancellation context.
    ///
    /// On cancellation, chunks already verified may stay in the local
    /// cache; no partial reassembled content is ever returned.
    pub async fn retrieve_with_cancel(
        &self,
        cancel: &CancellationToken,
        manifest_cid: &Cid,
    ) -> Result<(Vec<u8>, ContentManifest), DdsError> {
        debug!(%manifest_cid, "retrieving content");

        let manifest_bytes = self
            .fetch_data(cancel, manifest_cid, FetchKind::Manifest)
            .await
            .map_err(|e| wrap_fetch_error(FetchKind::Manifest, manifest_cid, e))?;
        let manifest = deserialize_manifest(&manifest_bytes)?;

        if manifest.chunk_cids.is_empty() {
            let empty = Cid::of_empty();
            if manifest.total_size == 0 && manifest.original_hash == empty {
                debug!(%manifest_cid, "verified zero-byte content");
                return Ok((Vec::new(), manifest));
            }
            // A chunkless manifest claiming content (or a wrong empty
            // hash) cannot reassemble to anything valid.
            return Err(DdsError::ContentVerification {
                expected: manifest.original_hash.clone(),
                actual: empty,
            });
        }

        let mut buffer = Vec::with_capacity(manifest.total_size as usize);
        for chunk_cid in &manifest.chunk_cids {
            if cancel.is_cancelled() {
                return Err(DdsError::Cancelled);
            }
            let data = self
                .fetch_data(cancel, chunk_cid, FetchKind::Chunk)
                .await
                .map_err(|e| wrap_fetch_error(FetchKind::Chunk, chunk_cid, e))?;

            let actual = Cid::from_data(&data);
            if actual != *chunk_cid {
                error!(expected = %chunk_cid, %actual, "chunk failed verification");
                return Err(DdsError::ChunkVerification {
                    expected: chunk_cid.clone(),
                    actual,
                });
            }
            buffer.extend_from_slice(&data);
        }

        let actual = Cid::from_data(&buffer);
        if actual != manifest.original_hash {
            error!(
                expected = %manifest.original_hash,
                %actual,
                "reassembled content failed verification"
            );
            return Err(DdsError::ContentVerification {
                expected: manifest.original_hash.clone(),
                actual,
            });
        }

        info!(%manifest_cid, size = buffer.len(), "retrieved content");
        Ok((buffer, manifest))
    }

    /// Fetch raw bytes for an identifier: local store first, then the
    /// provider network.
    async fn fetch_data(
        &self,
        cancel: &CancellationToken,
        cid: &Cid,
        kind: FetchKind,
    ) -> Result<Bytes, DdsError> {
        match self.store.get(cid.as_str()).await {
            Ok(data) => {
                debug!(%cid, kind = kind.as_str(), "local store hit");
                return Ok(data);
            }
            Err(StoreError::NotFound(_)) => {}
            Err(source) => {
                return Err(DdsError::Storage {
                    cid: cid.clone(),
                    source,
                })
            }
        }

        debug!(%cid, kind = kind.as_str(), "local miss, looking up providers");
        let providers = tokio::select! {
            _ = cancel.cancelled() => return Err(DdsError::Cancelled),
            result = self.provider.find_providers(cid) => result?,
        };
        if providers.is_empty() {
            return Err(DdsError::NoProviders { cid: cid.clone() });
        }

        let attempted = providers.len();
        for peer in &providers {
            let fetched = tokio::select! {
                _ = cancel.cancelled() => return Err(DdsError::Cancelled),
                result = self.provider.fetch(peer, cid) => result,
            };
            match fetched {
                Ok(data) => {
                    debug!(%cid, %peer, size = data.len(), "fetched from provider");
                    // Opportunistic cache write; the returned bytes are
                    // unaffected by a failure here.
                    if let Err(e) = self.store.put(cid.as_str(), data.clone()).await {
                        warn!(%cid, error = %e, "failed to cache fetched data locally");
                    }
                    return Ok(data);
                }
                Err(e) => {
                    debug!(%cid, %peer, error = %e, "provider fetch failed, trying next");
                }
            }
        }

        Err(DdsError::ProvidersExhausted {
            cid: cid.clone(),
            attempted,
        })
    }
}

/// Wrap a fetch failure with the operation it happened in. Cancellation
/// passes through unwrapped so callers see the cancellation reason.
fn wrap_fetch_error(kind: FetchKind, cid: &Cid, source: DdsError) -> DdsError {
    if matches!(source, DdsError::Cancelled) {
        return source;
    }
    match kind {
        FetchKind::Manifest => DdsError::ManifestRetrieval {
            cid: cid.clone(),
            source: Box::new(source),
        },
        FetchKind::Chunk => DdsError::ChunkRetrieval {
            cid: cid.clone(),
            source: Box::new(source),
        },
    }
}
