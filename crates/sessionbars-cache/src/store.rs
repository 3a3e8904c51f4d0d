//! Key/value store abstraction.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// String key/value store with per-entry expiry.
///
/// Implementations must treat a missing or expired key as `Ok(None)`.
#[async_trait]
pub trait CacheStore: Send + Sync + std::fmt::Debug {
    /// Stores `value` under `key`, replacing any existing value and
    /// restarting its expiry at `ttl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot complete the write.
    async fn set_with_expiry(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Returns the live value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot complete the read.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
