//! In-memory chunk storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::{sanitize_cid, ChunkStore};

/// In-memory chunk store backed by a `RwLock<HashMap>`.
///
/// Useful for tests and for nodes configured to run without persistence.
/// Applies the same identifier sanitization as the disk backend so both
/// surfaces behave identically.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ChunkStore for MemoryStore {
    async fn put(&self, cid: &str, data: Bytes) -> Result<(), StoreError> {
        let safe = sanitize_cid(cid)?;
        let mut map = self.entries.write().expect("lock poisoned");
        debug!(cid = safe, size = data.len(), "storing entry in memory");
        map.insert(safe.to_string(), data);
        Ok(())
    }

    async fn get(&self, cid: &str) -> Result<Bytes, StoreError> {
        let safe = sanitize_cid(cid)?;
        let map = self.entries.read().expect("lock poisoned");
        map.get(safe)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(safe.to_string()))
    }

    async fn contains(&self, cid: &str) -> Result<bool, StoreError> {
        let safe = sanitize_cid(cid)?;
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.contains_key(safe))
    }

    async fn delete(&self, cid: &str) -> Result<(), StoreError> {
        let safe = sanitize_cid(cid)?;
        let mut map = self.entries.write().expect("lock poisoned");
        match map.remove(safe) {
            Some(_) => {
                debug!(cid = safe, "deleted entry from memory");
                Ok(())
            }
            None => Err(StoreError::NotFound(safe.to_string())),
        }
    }

    fn locate(&self, cid: &str) -> Result<String, StoreError> {
        let safe = sanitize_cid(cid)?;
        Ok(format!("memory://{safe}"))
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.keys().cloned().collect())
    }
}
