//! Shared types and identifiers for Reef.
//!
//! This crate defines the types used across the Reef workspace:
//! content identifiers ([`Cid`]), peer identifiers ([`PeerId`]),
//! the content manifest ([`ContentManifest`]), hashing and encoding
//! helpers ([`sha256`], [`hash_hex`]), and configuration ([`ReefConfig`]).

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// Hashing and encoding
// ---------------------------------------------------------------------------

/// Compute the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute the lowercase hex encoding of `SHA-256(data)`.
///
/// Used for transaction and block identifiers, where the hex form is part
/// of the signing contract (signatures cover the raw hash bytes that the
/// hex string encodes).
pub fn hash_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Current wall-clock time in nanoseconds since UNIX epoch.
pub fn wall_clock_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

// ---------------------------------------------------------------------------
// Content identifiers
// ---------------------------------------------------------------------------

/// Errors from parsing a textual content identifier.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CidError {
    /// The identifier string was empty.
    #[error("content identifier is empty")]
    Empty,

    /// The identifier contained characters outside the Base58BTC alphabet.
    #[error("content identifier is not valid Base58BTC")]
    InvalidEncoding,

    /// The identifier decoded to something other than a 32-byte digest.
    #[error("content identifier decodes to {0} bytes, expected 32")]
    BadLength(usize),
}

/// Content-addressed identifier: `Base58BTC(SHA-256(bytes))`.
///
/// A `Cid` uniquely determines the bytes it names; recomputing the
/// identifier of retrieved bytes must match the expected identifier.
/// Chunks, manifests, and original-content hashes all use this form.
#[derive(Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Cid(String);

impl Cid {
    /// Create an identifier by hashing arbitrary data.
    pub fn from_data(data: &[u8]) -> Self {
        Self(bs58::encode(sha256(data)).into_string())
    }

    /// The well-known identifier of the empty byte string.
    ///
    /// Zero-byte content flows through the system relying on this being
    /// non-empty and stable.
    pub fn of_empty() -> Self {
        Self::from_data(&[])
    }

    /// Parse a textual identifier, validating that it is non-empty
    /// Base58BTC text encoding a 32-byte digest.
    pub fn parse(s: &str) -> Result<Self, CidError> {
        if s.trim().is_empty() {
            return Err(CidError::Empty);
        }
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|_| CidError::InvalidEncoding)?;
        if decoded.len() != 32 {
            return Err(CidError::BadLength(decoded.len()));
        }
        Ok(Self(s.to_string()))
    }

    /// Return the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cid({})", self.0)
    }
}

impl AsRef<str> for Cid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cid {
    type Err = CidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Peer identifiers
// ---------------------------------------------------------------------------

/// Identifier for a remote peer in the provider network.
///
/// Opaque to the core; a real transport derives it from the peer's
/// network identity.
#[derive(Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PeerId(String);

impl PeerId {
    /// Create a peer identifier from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Content manifest
// ---------------------------------------------------------------------------

/// Current manifest format version.
pub const MANIFEST_VERSION: u8 = 1;

/// Manifest describing how a piece of content was chunked.
///
/// A manifest records the ordered chunk identifiers, the hash and size of
/// the original unchunked bytes, and optional descriptive metadata. Its own
/// identifier is derived from its canonical (postcard) encoding, so all
/// fields participate in content addressing.
///
/// The `version` field enables safe format evolution: code that decodes a
/// manifest must reject unknown versions rather than silently
/// misinterpreting data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentManifest {
    /// Format version. Current version is [`MANIFEST_VERSION`] (1).
    pub version: u8,
    /// Ordered identifiers of the content's chunks.
    pub chunk_cids: Vec<Cid>,
    /// Identifier of the full, unchunked content bytes.
    pub original_hash: Cid,
    /// Size of the original content in bytes.
    pub total_size: u64,
    /// MIME type of the original content, if known.
    pub mime_type: Option<String>,
    /// Original filename, if known.
    pub filename: Option<String>,
    /// Unix timestamp (nanoseconds) when the manifest was created.
    pub created_at: u64,
    /// User-supplied metadata.
    pub metadata: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default chunk size: 256 KiB.
pub const DEFAULT_CHUNK_SIZE: u32 = 262_144;

/// Node configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReefConfig {
    /// Chunk size in bytes for content publishing. Must be positive.
    pub chunk_size: u32,
    /// Base directory for the on-disk chunk store. Created with mode 0750
    /// if absent.
    pub storage_base_path: PathBuf,
    /// Path to the JSON wallet file.
    pub wallet_path: PathBuf,
}

impl Default for ReefConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            storage_base_path: PathBuf::from(".reef/chunks"),
            wallet_path: PathBuf::from(".reef/wallet.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
