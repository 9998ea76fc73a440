//! Content addressing, chunking, and manifest building.
//!
//! This crate provides:
//! - [`Chunker`] — splits content into fixed-size chunks, each identified
//!   by the Base58BTC encoding of its SHA-256 hash.
//! - [`build_manifest`] — constructs a [`ContentManifest`](reef_types::ContentManifest)
//!   from chunk identifiers.
//! - [`serialize_manifest`] / [`deserialize_manifest`] — the canonical
//!   (postcard) manifest wire format, and [`manifest_cid`] over it.
//!
//! The manifest's canonical bytes are an interoperability contract: the
//! manifest identifier is derived from those bytes, so two nodes building
//! a manifest from the same logical values must agree byte for byte.

mod chunker;
mod error;
mod manifest;

pub use chunker::{Chunk, Chunker};
pub use error::CasError;
pub use manifest::{
    build_manifest, build_manifest_with_timestamp, deserialize_manifest, manifest_cid,
    serialize_manifest,
};
