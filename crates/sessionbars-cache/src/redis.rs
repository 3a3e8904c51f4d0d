//! Redis cache store.

use async_trait::async_trait;
use bb8_redis::{RedisConnectionManager, bb8, redis::cmd};
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    CacheStore,
    error::{CacheError, Result},
};

/// Redis-backed [`CacheStore`] using a `bb8` connection pool.
///
/// Entries are written with `SET key value EX seconds`, so Redis owns expiry.
#[derive(Debug, Clone)]
pub struct RedisStore {
    pool: bb8::Pool<RedisConnectionManager>,
}

impl RedisStore {
    /// Connects to Redis at `redis_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid or the pool
    /// cannot be built.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let manager = RedisConnectionManager::new(redis_url)
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        let pool = bb8::Pool::builder()
            .max_size(16)
            .max_lifetime(Some(Duration::from_secs(60 * 15)))
            .idle_timeout(Some(Duration::from_secs(60 * 5)))
            .build(manager)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        info!("connected to Redis cache");
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<bb8::PooledConnection<'_, RedisConnectionManager>> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn set_with_expiry(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut *conn)
            .await
            .map_err(|e| CacheError::Command {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        debug!(key, "redis set ok");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await
            .map_err(|e| CacheError::Command {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
