//! Chunk storage trait and backend implementations.
//!
//! This crate defines the [`ChunkStore`] trait — a persistent mapping from
//! content identifiers to bytes — along with two concrete backends:
//!
//! - [`MemoryStore`] — in-memory storage backed by a `RwLock<HashMap>`.
//! - [`FileStore`] — one file per identifier under a base directory.
//!
//! The store does not verify that stored bytes hash back to their
//! identifier; the retrieval pipeline enforces that invariant.

mod error;
mod file_store;
mod memory_store;
mod traits;

pub use error::StoreError;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::{sanitize_cid, ChunkStore};
