//! Typed minute bar access on top of a [`CacheStore`].

use chrono::NaiveDate;
use sessionbars_aggregate::{MinuteBar, MinuteBars};
use sessionbars_calendar::SessionWindow;
use sessionbars_types::{MinuteLabel, Scope, Symbol};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    BarKey, CacheStore, Ttl,
    error::{CacheError, Result},
};

/// Outcome of writing a batch of bars.
///
/// Writes are best-effort: a failed write is counted and the batch continues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Bars stored.
    pub written: usize,
    /// Bars the store rejected.
    pub failed: usize,
}

impl WriteSummary {
    /// Returns the number of bars attempted.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.written + self.failed
    }

    /// Returns true if every write succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Bars read back for one symbol over a session window.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionBars {
    /// Cached bars in label order.
    pub bars: Vec<MinuteBar>,
    /// Session labels with no cached bar.
    pub missing: Vec<MinuteLabel>,
    /// Number of labels in the session.
    pub expected: usize,
}

impl SessionBars {
    /// Returns the number of bars found.
    #[must_use]
    pub fn found(&self) -> usize {
        self.bars.len()
    }

    /// Returns `found / expected`; an empty session counts as complete.
    #[must_use]
    pub fn completeness(&self) -> f64 {
        if self.expected == 0 {
            return 1.0;
        }
        self.bars.len() as f64 / self.expected as f64
    }
}

/// Minute bar cache.
///
/// Serializes [`MinuteBar`]s as JSON under [`BarKey`]s. Absent bars are
/// returned as `None`.
#[derive(Debug, Clone)]
pub struct BarCache {
    store: Arc<dyn CacheStore>,
    ttl: Ttl,
}

impl BarCache {
    /// Creates a cache writing with `ttl` by default.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, ttl: Ttl) -> Self {
        Self { store, ttl }
    }

    /// Returns the default TTL used by [`BarCache::put_all`].
    #[must_use]
    pub const fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Writes one bar, overwriting any existing value and refreshing its TTL.
    ///
    /// # Errors
    ///
    /// Returns an error if the bar cannot be serialized or stored.
    pub async fn put(&self, key: BarKey<'_>, bar: &MinuteBar, ttl: Ttl) -> Result<()> {
        let key = key.to_string();
        let value = serde_json::to_string(bar).map_err(|source| CacheError::Serialize {
            key: key.clone(),
            source,
        })?;
        self.store
            .set_with_expiry(&key, value, ttl.as_duration())
            .await
    }

    /// Reads one bar.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the cached value is corrupt.
    pub async fn get(&self, key: BarKey<'_>) -> Result<Option<MinuteBar>> {
        let key = key.to_string();
        match self.store.get(&key).await? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|source| CacheError::Deserialize { key, source }),
            None => Ok(None),
        }
    }

    /// Writes every bar of one symbol's session with the default TTL.
    ///
    /// Each bar is keyed by its own label. A failed write is logged and
    /// counted; the remaining bars are still written.
    pub async fn put_all(
        &self,
        scope: &Scope,
        date: NaiveDate,
        symbol: &Symbol,
        bars: &MinuteBars,
    ) -> WriteSummary {
        let mut summary = WriteSummary::default();
        for (label, bar) in bars {
            let key = BarKey::new(scope, date, symbol, *label);
            match self.put(key, bar, self.ttl).await {
                Ok(()) => summary.written += 1,
                Err(e) => {
                    summary.failed += 1;
                    warn!(%key, error = %e, "failed to cache bar");
                }
            }
        }
        debug!(
            %scope,
            %symbol,
            backend = self.store.backend(),
            written = summary.written,
            failed = summary.failed,
            "cached session bars"
        );
        summary
    }

    /// Reads every label of `window` for one symbol.
    ///
    /// # Errors
    ///
    /// Returns the first store or decoding error.
    pub async fn get_session(
        &self,
        scope: &Scope,
        symbol: &Symbol,
        window: &SessionWindow,
    ) -> Result<SessionBars> {
        let mut bars = Vec::new();
        let mut missing = Vec::new();
        for &label in window.labels() {
            match self
                .get(BarKey::new(scope, window.date(), symbol, label))
                .await?
            {
                Some(bar) => bars.push(bar),
                None => missing.push(label),
            }
        }
        Ok(SessionBars {
            bars,
            missing,
            expected: window.len(),
        })
    }
}
