//! File-based chunk storage backend.
//!
//! Stores one file per identifier directly under the base directory; the
//! file name is the sanitized identifier and the contents are the bytes
//! verbatim. Directories are created with mode `0750`, files with `0640`.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::{sanitize_cid, ChunkStore};

/// File-based chunk store.
///
/// Writes are atomic: data is written to a temporary file first, then
/// renamed into place, so `get` observes either the prior value or the new
/// one — never a torn write. An instance-wide reader-writer lock keeps
/// writes mutually exclusive with reads.
pub struct FileStore {
    base_dir: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    /// Create a new file store rooted at the given directory.
    ///
    /// The directory is created (mode `0750`) if it does not exist. Fails
    /// with [`StoreError::InvalidId`] for an empty base path.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if base_dir.as_os_str().is_empty() {
            return Err(StoreError::InvalidId(String::new()));
        }
        std::fs::create_dir_all(&base_dir)?;
        set_dir_permissions(&base_dir)?;
        Ok(Self {
            base_dir,
            lock: RwLock::new(()),
        })
    }

    /// Compute the file path for an identifier after sanitization.
    fn entry_path(&self, cid: &str) -> Result<PathBuf, StoreError> {
        let safe = sanitize_cid(cid)?;
        Ok(self.base_dir.join(safe))
    }
}

#[async_trait::async_trait]
impl ChunkStore for FileStore {
    async fn put(&self, cid: &str, data: Bytes) -> Result<(), StoreError> {
        let path = self.entry_path(cid)?;
        let tmp_path = path.with_extension("tmp");

        let _guard = self.lock.write().await;

        // Atomic write: temp file in the same directory, then rename.
        tokio::fs::write(&tmp_path, &data).await?;
        set_file_permissions(&tmp_path).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        debug!(%cid, path = %path.display(), size = data.len(), "stored entry to file");
        Ok(())
    }

    async fn get(&self, cid: &str) -> Result<Bytes, StoreError> {
        let path = self.entry_path(cid)?;

        let _guard = self.lock.read().await;

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(cid.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn contains(&self, cid: &str) -> Result<bool, StoreError> {
        let path = self.entry_path(cid)?;

        let _guard = self.lock.read().await;

        match tokio::fs::metadata(&path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn delete(&self, cid: &str) -> Result<(), StoreError> {
        let path = self.entry_path(cid)?;

        let _guard = self.lock.write().await;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(%cid, "deleted stored entry");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(cid.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn locate(&self, cid: &str) -> Result<String, StoreError> {
        Ok(self.entry_path(cid)?.display().to_string())
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let _guard = self.lock.read().await;

        let mut ids = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.base_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                // Identifiers never contain dots; a dotted name is a
                // leftover temp file from an interrupted write.
                if !name.contains('.') {
                    ids.push(name.to_string());
                }
            }
        }
        Ok(ids)
    }
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o750))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
async fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o640)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}
