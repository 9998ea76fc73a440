//! Fixed-size chunker for splitting content into content-addressed chunks.

use reef_types::Cid;

use crate::error::CasError;

/// A single chunk of content with its content-addressed identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Content-addressed identifier: `Base58BTC(SHA-256(data))`.
    pub cid: Cid,
    /// Byte offset within the original content.
    pub offset: u64,
    /// The raw chunk data. An owned copy, independent of the input buffer.
    pub data: Vec<u8>,
}

/// Fixed-size chunker that splits content into pieces of a configured size.
///
/// Every piece except the last has exactly `chunk_size` bytes; the last
/// piece carries the remainder. Content whose length is an exact multiple
/// of `chunk_size` ends with a full-size piece, never an empty one.
/// Empty content produces zero chunks.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: u32,
}

impl Chunker {
    /// Create a new chunker with the given chunk size in bytes.
    ///
    /// Fails with [`CasError::InvalidChunkSize`] for a zero size.
    pub fn new(chunk_size: u32) -> Result<Self, CasError> {
        if chunk_size == 0 {
            return Err(CasError::InvalidChunkSize);
        }
        Ok(Self { chunk_size })
    }

    /// Return the configured chunk size in bytes.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Split content into fixed-size chunks.
    ///
    /// Each chunk's identifier is the hash of its own data. Returns an
    /// empty vec for empty input.
    pub fn chunk(&self, data: &[u8]) -> Vec<Chunk> {
        if data.is_empty() {
            return Vec::new();
        }

        let chunk_size = self.chunk_size as usize;
        let mut chunks = Vec::with_capacity(data.len().div_ceil(chunk_size));
        let mut offset = 0u64;

        for slice in data.chunks(chunk_size) {
            chunks.push(Chunk {
                cid: Cid::from_data(slice),
                offset,
                data: slice.to_vec(),
            });
            offset += slice.len() as u64;
        }

        chunks
    }
}
