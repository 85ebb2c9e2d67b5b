//! Disk Store Module
//!
//! Flat one-file-per-key storage for cached images.

use std::io;
use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info};

use crate::cache::ENTRY_EXTENSION;
use crate::key::ImageKey;

// == Disk Store ==
/// File-backed image storage.
///
/// Each key maps to exactly one file, `{key}.jpg`, directly under the
/// root directory. Writes are whole-file overwrites; there is no
/// cross-key transactional behavior.
#[derive(Debug, Clone)]
pub struct DiskStore {
    /// Cache root directory
    root: PathBuf,
}

impl DiskStore {
    // == Constructor ==
    /// Creates a new DiskStore over the given root directory.
    ///
    /// The directory is not touched until `ensure_root` or the first
    /// write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // == Ensure Root ==
    /// Creates the cache root directory (and parents) if absent.
    pub async fn ensure_root(&self) -> io::Result<()> {
        if fs::try_exists(&self.root).await? {
            return Ok(());
        }

        fs::create_dir_all(&self.root).await?;
        info!("Created cache directory: {}", self.root.display());
        Ok(())
    }

    // == Entry Path ==
    /// Returns the file path backing `key`.
    pub fn entry_path(&self, key: &ImageKey) -> PathBuf {
        self.root.join(format!("{}.{}", key, ENTRY_EXTENSION))
    }

    // == Read ==
    /// Reads the entry for `key`, or None if it cannot be read.
    ///
    /// Any read failure counts as a miss. Failures other than plain
    /// absence are logged at debug level but not otherwise distinguished.
    pub async fn read(&self, key: &ImageKey) -> Option<Vec<u8>> {
        match fs::read(self.entry_path(key)).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    debug!("Unreadable cache entry for {}: {}", key, err);
                }
                None
            }
        }
    }

    // == Write ==
    /// Writes `bytes` as the entry for `key`, replacing any existing
    /// entry.
    pub async fn write(&self, key: &ImageKey, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.entry_path(key), bytes).await
    }

    // == Remove ==
    /// Removes the entry for `key`.
    ///
    /// Returns true only if the file was removed; absence and any other
    /// removal failure both return false.
    pub async fn remove(&self, key: &ImageKey) -> bool {
        fs::remove_file(self.entry_path(key)).await.is_ok()
    }
}
