//! Manifest building and canonical serialization.
//!
//! A [`ContentManifest`] describes how content was chunked. It is stored in
//! the chunk store like any other object, keyed by [`manifest_cid`] — the
//! identifier of its canonical postcard encoding. Postcard encodes struct
//! fields in declaration order with no padding or map reordering, so two
//! nodes serializing the same logical manifest always produce the same
//! bytes, and therefore the same identifier.

use std::collections::BTreeMap;

use reef_types::{wall_clock_nanos, Cid, ContentManifest, MANIFEST_VERSION};

use crate::error::CasError;

/// Build a [`ContentManifest`] from chunk identifiers, stamped with the
/// current wall-clock time.
///
/// Rejects inconsistent combinations: non-empty content with no chunks,
/// and zero-byte content with chunks.
pub fn build_manifest(
    chunk_cids: Vec<Cid>,
    original_hash: Cid,
    total_size: u64,
    mime_type: Option<String>,
    filename: Option<String>,
    metadata: BTreeMap<String, String>,
) -> Result<ContentManifest, CasError> {
    build_manifest_with_timestamp(
        chunk_cids,
        original_hash,
        total_size,
        mime_type,
        filename,
        metadata,
        wall_clock_nanos(),
    )
}

/// Build a manifest with an explicit timestamp (for deterministic testing).
#[allow(clippy::too_many_arguments)]
pub fn build_manifest_with_timestamp(
    chunk_cids: Vec<Cid>,
    original_hash: Cid,
    total_size: u64,
    mime_type: Option<String>,
    filename: Option<String>,
    metadata: BTreeMap<String, String>,
    created_at: u64,
) -> Result<ContentManifest, CasError> {
    if total_size > 0 && chunk_cids.is_empty() {
        return Err(CasError::MissingChunks { total_size });
    }
    if total_size == 0 && !chunk_cids.is_empty() {
        return Err(CasError::UnexpectedChunks {
            count: chunk_cids.len(),
        });
    }

    Ok(ContentManifest {
        version: MANIFEST_VERSION,
        chunk_cids,
        original_hash,
        total_size,
        mime_type,
        filename,
        created_at,
        metadata,
    })
}

/// Serialize a manifest to its canonical postcard bytes.
pub fn serialize_manifest(manifest: &ContentManifest) -> Result<Vec<u8>, CasError> {
    postcard::to_allocvec(manifest).map_err(|e| CasError::Serialization(e.to_string()))
}

/// Deserialize a manifest from its canonical postcard bytes.
///
/// Rejects manifests with unknown version numbers to prevent silent
/// misinterpretation of data across format changes.
pub fn deserialize_manifest(bytes: &[u8]) -> Result<ContentManifest, CasError> {
    let manifest: ContentManifest =
        postcard::from_bytes(bytes).map_err(|e| CasError::Serialization(e.to_string()))?;
    if manifest.version != MANIFEST_VERSION {
        return Err(CasError::UnsupportedVersion {
            found: manifest.version,
            supported: MANIFEST_VERSION,
        });
    }
    Ok(manifest)
}

/// Compute a manifest's content-addressed identifier:
/// `Base58BTC(SHA-256(canonical_bytes))`.
pub fn manifest_cid(manifest: &ContentManifest) -> Result<Cid, CasError> {
    Ok(Cid::from_data(&serialize_manifest(manifest)?))
}
