//! Cache backend and calendar wiring for commands.

use anyhow::{Context, Result};
use sessionbars_lib::{CacheStore, ExchangeCalendar, MemoryStore};
use std::{path::Path, sync::Arc};
use tracing::warn;

/// Loads the exchange calendar from `path`, or the built-in one.
pub(crate) fn load_calendar(path: Option<&Path>) -> Result<ExchangeCalendar> {
    let Some(path) = path else {
        return Ok(ExchangeCalendar::global().clone());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read calendar file: {}", path.display()))?;
    ExchangeCalendar::from_json(&json)
        .with_context(|| format!("Invalid calendar file: {}", path.display()))
}

/// Where commands read and write bars.
#[derive(Debug)]
pub(crate) struct Backend {
    pub(crate) calendar: ExchangeCalendar,
    redis_url: Option<String>,
}

impl Backend {
    pub(crate) const fn new(calendar: ExchangeCalendar, redis_url: Option<String>) -> Self {
        Self {
            calendar,
            redis_url,
        }
    }

    /// Opens the cache store: Redis when a URL was given, memory otherwise.
    pub(crate) async fn open_store(&self) -> Result<Arc<dyn CacheStore>> {
        match self.redis_url.as_deref() {
            #[cfg(feature = "redis")]
            Some(url) => {
                let store = sessionbars_lib::RedisStore::connect(url)
                    .await
                    .context("Failed to connect to Redis")?;
                Ok(Arc::new(store))
            }
            #[cfg(not(feature = "redis"))]
            Some(_) => anyhow::bail!("Redis support not compiled in"),
            None => {
                warn!("no Redis URL given; bars are kept in memory and discarded on exit");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}
