//! # Query Cache
//!
//! Process-wide memoized query state keyed by logical resource name. The
//! upload pipeline is the only writer of invalidation signals; readers
//! memoize snapshots through [`QueryCache::get_or_load`] and can subscribe to
//! invalidation events to know when to re-fetch.
//!
//! Invalidation is prefix-based: invalidating `outlets` also drops every
//! `outlets/<file-id>` entry, so per-file drill-down reads refresh together
//! with the main listing.

use std::any::Any;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use tokio::sync::broadcast;
use tracing::debug;

/// Logical resource names used as cache keys.
pub mod keys {
    use uuid::Uuid;

    /// The full outlet record listing.
    pub const OUTLETS: &str = "outlets";

    /// The upload manifest listing.
    pub const UPLOADED_FILES: &str = "uploaded_files";

    /// Outlet records filtered to one upload.
    pub fn outlets_by_file(file_id: &Uuid) -> String {
        format!("{}/{}", OUTLETS, file_id)
    }
}

type Snapshot = Arc<dyn Any + Send + Sync>;

/// Memoized query snapshots with subscriber-visible invalidation.
///
/// Capacity-bounded: per-file keys are open-ended, so the least recently
/// used snapshot is evicted once the bound is reached.
pub struct QueryCache {
    entries: Mutex<LruCache<String, Snapshot>>,
    events: broadcast::Sender<String>,
}

impl QueryCache {
    /// Create a cache holding at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        let (events, _) = broadcast::channel(64);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            events,
        }
    }

    /// Return the memoized snapshot for `key`, or run `loader` and memoize
    /// its result. Failed loads are returned to the caller and never cached.
    pub async fn get_or_load<T, E, F, Fut>(&self, key: &str, loader: F) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key) {
            return Ok(hit);
        }

        let value = Arc::new(loader().await?);
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .put(key.to_string(), value.clone() as Snapshot);
        Ok(value)
    }

    /// Return the memoized snapshot for `key` if present and of type `T`.
    pub fn get<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .and_then(|snapshot| snapshot.clone().downcast::<T>().ok())
    }

    /// Drop the snapshot for `key` and every snapshot under `key/`, then
    /// notify subscribers with the invalidated key.
    pub fn invalidate(&self, key: &str) {
        let prefix = format!("{}/", key);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let stale: Vec<String> = entries
            .iter()
            .map(|(k, _)| k.clone())
            .filter(|k| k == key || k.starts_with(&prefix))
            .collect();
        for k in &stale {
            entries.pop(k);
        }
        drop(entries);

        debug!(key, dropped = stale.len(), "invalidated cached queries");
        // Nobody listening is fine; the cache itself is already consistent.
        let _ = self.events.send(key.to_string());
    }

    /// Subscribe to invalidation events. Each received value is the logical
    /// key passed to [`QueryCache::invalidate`].
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.events.subscribe()
    }
}
