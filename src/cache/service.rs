//! Image Cache Service Module
//!
//! Read-through cache engine coordinating the disk store and the remote
//! origin.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::DiskStore;
use crate::error::{CacheError, Result};
use crate::key::ImageKey;
use crate::origin::Origin;

// == Image Cache ==
/// Cache-fill coordinator.
///
/// Serves entries from the disk store, falling back to an origin fetch on
/// miss; a fetched entry is persisted before it is returned. Put and
/// delete operate on the disk store alone and never touch the origin.
///
/// There is no locking: concurrent operations on the same key race at the
/// filesystem and the last writer wins.
#[derive(Clone)]
pub struct ImageCache {
    /// Local entry storage
    disk: DiskStore,
    /// Remote source for missing entries
    origin: Arc<dyn Origin>,
}

impl ImageCache {
    // == Constructor ==
    /// Creates a new ImageCache over the given store and origin.
    pub fn new(disk: DiskStore, origin: Arc<dyn Origin>) -> Self {
        Self { disk, origin }
    }

    // == Fetch ==
    /// Retrieves the entry for `key`, filling the cache from the origin
    /// on miss.
    ///
    /// A cache hit returns immediately without touching the origin. On
    /// miss, a successful origin fetch is persisted and then returned;
    /// a failed persist is logged but the fetched bytes are still served.
    /// Any origin failure surfaces as NotFound, and nothing is cached,
    /// so the next fetch retries the origin.
    pub async fn fetch(&self, key: &ImageKey) -> Result<Vec<u8>> {
        if let Some(bytes) = self.disk.read(key).await {
            info!("GET {} - served from cache", key);
            return Ok(bytes);
        }

        match self.origin.fetch(key).await {
            Ok(bytes) => {
                match self.disk.write(key, &bytes).await {
                    Ok(()) => info!("GET {} - filled from origin ({} bytes)", key, bytes.len()),
                    Err(err) => {
                        warn!("GET {} - fetched from origin but cache write failed: {}", key, err)
                    }
                }
                Ok(bytes)
            }
            Err(err) => {
                info!("GET {} - not found at origin: {}", key, err);
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Put ==
    /// Stores `bytes` as the entry for `key`, replacing any existing
    /// entry.
    ///
    /// The payload is opaque; nothing checks that it is a valid image.
    pub async fn put(&self, key: &ImageKey, bytes: &[u8]) -> Result<()> {
        self.disk.write(key, bytes).await?;
        info!("PUT {} - stored {} bytes", key, bytes.len());
        Ok(())
    }

    // == Delete ==
    /// Removes the entry for `key`.
    ///
    /// Absence and any other removal failure are not distinguished; both
    /// surface as NotFound.
    pub async fn delete(&self, key: &ImageKey) -> Result<()> {
        if self.disk.remove(key).await {
            info!("DELETE {} - removed", key);
            Ok(())
        } else {
            Err(CacheError::NotFound(key.to_string()))
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    use crate::origin::{BoxFuture, OriginError};

    /// Origin serving a fixed set of entries, counting every fetch.
    struct MockOrigin {
        entries: HashMap<String, Vec<u8>>,
        calls: AtomicUsize,
    }

    impl MockOrigin {
        fn new(entries: &[(&str, &[u8])]) -> Arc<Self> {
            Arc::new(Self {
                entries: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_vec()))
                    .collect(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Origin for MockOrigin {
        fn fetch<'a>(
            &'a self,
            key: &'a ImageKey,
        ) -> BoxFuture<'a, std::result::Result<Vec<u8>, OriginError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.entries
                    .get(key.as_str())
                    .cloned()
                    .ok_or_else(|| OriginError::Transport("connection refused".to_string()))
            })
        }
    }

    fn key(raw: &str) -> ImageKey {
        ImageKey::parse(raw).unwrap()
    }

    fn cache_over(dir: &TempDir, origin: Arc<MockOrigin>) -> ImageCache {
        ImageCache::new(DiskStore::new(dir.path()), origin)
    }

    #[tokio::test]
    async fn test_fetch_hit_skips_origin() {
        let dir = TempDir::new().unwrap();
        let origin = MockOrigin::new(&[]);
        let cache = cache_over(&dir, origin.clone());

        cache.put(&key("200"), b"cached").await.unwrap();

        assert_eq!(cache.fetch(&key("200")).await.unwrap(), b"cached");
        assert_eq!(origin.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_miss_fills_from_origin() {
        let dir = TempDir::new().unwrap();
        let origin = MockOrigin::new(&[("404", b"origin bytes")]);
        let cache = cache_over(&dir, origin.clone());

        assert_eq!(cache.fetch(&key("404")).await.unwrap(), b"origin bytes");
        assert_eq!(origin.calls(), 1);

        // The fill persisted: the second fetch is a local hit
        assert_eq!(cache.fetch(&key("404")).await.unwrap(), b"origin bytes");
        assert_eq!(origin.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_origin_failure_not_cached() {
        let dir = TempDir::new().unwrap();
        let origin = MockOrigin::new(&[]);
        let cache = cache_over(&dir, origin.clone());

        let result = cache.fetch(&key("511")).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));

        // No negative caching: the origin is queried again
        let result = cache.fetch(&key("511")).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
        assert_eq!(origin.calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_serves_origin_bytes_when_fill_write_fails() {
        let dir = TempDir::new().unwrap();
        // A root below a regular file makes every write fail
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let origin = MockOrigin::new(&[("302", b"redirect image")]);
        let cache = ImageCache::new(DiskStore::new(blocker.join("cache")), origin);

        assert_eq!(cache.fetch(&key("302")).await.unwrap(), b"redirect image");
    }

    #[tokio::test]
    async fn test_put_storage_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let cache = ImageCache::new(DiskStore::new(blocker.join("cache")), MockOrigin::new(&[]));

        let result = cache.put(&key("200"), b"payload").await;
        assert!(matches!(result, Err(CacheError::Storage(_))));
    }

    #[tokio::test]
    async fn test_delete_present_and_absent() {
        let dir = TempDir::new().unwrap();
        let cache = cache_over(&dir, MockOrigin::new(&[]));

        cache.put(&key("301"), b"payload").await.unwrap();
        cache.delete(&key("301")).await.unwrap();

        let result = cache.delete(&key("301")).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_effective() {
        let dir = TempDir::new().unwrap();
        let origin = MockOrigin::new(&[]);
        let cache = cache_over(&dir, origin.clone());

        cache.put(&key("302"), b"payload").await.unwrap();
        cache.delete(&key("302")).await.unwrap();

        // No stale hit: the miss goes to the (empty) origin
        let result = cache.fetch(&key("302")).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
        assert_eq!(origin.calls(), 1);
    }
}
