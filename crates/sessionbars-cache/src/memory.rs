//! In-process cache store.

use async_trait::async_trait;
use std::{collections::HashMap, time::Duration};
use tokio::{sync::RwLock, time::Instant};
use tracing::debug;

use crate::{CacheStore, error::Result};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-process [`CacheStore`] backed by a hash map.
///
/// Expired entries are invisible to reads and are reclaimed by
/// [`MemoryStore::purge_expired`]. Expiry follows tokio's clock, so tests can
/// drive it with `tokio::time::advance`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let purged = before - entries.len();
        if purged > 0 {
            debug!(purged, "purged expired cache entries");
        }
        purged
    }

    /// Returns the number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    /// Returns true if the store holds no live entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns the remaining lifetime of a live entry.
    pub async fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.expires_at - now)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn set_with_expiry(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let expires_at = Instant::now() + ttl;
        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
