//! Session loading orchestration.

use chrono::NaiveDate;
use futures::{StreamExt, stream};
use sessionbars_aggregate::{MinuteBar, aggregate};
use sessionbars_cache::{BarCache, BarKey, CacheError, CacheStore, SessionBars};
use sessionbars_calendar::{ExchangeCalendar, SessionWindow};
use sessionbars_fetch::{FetchOutcome, TradeQuery, TradeSource, UpstreamFetchError, fetch_trades};
use sessionbars_types::{ConfigurationError, MinuteLabel, Scope, SessionType, Symbol};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};
use tracing::{debug, info, warn};

use crate::{LoadProgress, LoadReport, LoaderConfig, LoaderError, SymbolLoad, SymbolOutcome};

/// Loads sessions of minute bars into the cache and serves lookups.
///
/// Every operation takes the [`Scope`] explicitly; the loader holds no
/// per-run state, so one loader can serve many tenants.
#[derive(Debug, Clone)]
pub struct SessionLoader {
    source: Arc<dyn TradeSource>,
    cache: BarCache,
    calendar: ExchangeCalendar,
    config: LoaderConfig,
    progress: LoadProgress,
}

impl SessionLoader {
    /// Creates a loader using the default exchange calendar.
    #[must_use]
    pub fn new(
        source: Arc<dyn TradeSource>,
        store: Arc<dyn CacheStore>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            source,
            cache: BarCache::new(store, config.ttl),
            calendar: ExchangeCalendar::global().clone(),
            config,
            progress: LoadProgress::new(),
        }
    }

    /// Replaces the exchange calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: ExchangeCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Reports progress into `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: LoadProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Returns the exchange calendar.
    #[must_use]
    pub const fn calendar(&self) -> &ExchangeCalendar {
        &self.calendar
    }

    /// Returns the bar cache.
    #[must_use]
    pub const fn cache(&self) -> &BarCache {
        &self.cache
    }

    /// Returns the loader configuration.
    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Returns the progress tracker.
    #[must_use]
    pub const fn progress(&self) -> &LoadProgress {
        &self.progress
    }

    /// Fetches, aggregates, and caches one session for every symbol.
    ///
    /// The window is resolved once and shared by all symbols. Symbols run
    /// concurrently up to [`LoaderConfig::concurrency`]; duplicates are
    /// loaded once. A symbol's fetch or cache failures are recorded in the
    /// report and never abort the others.
    ///
    /// Dropping the returned future cancels in-flight fetches. Bars already
    /// written stay in the cache.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if `max_pages` is zero or the session
    /// cannot be resolved for `date`.
    pub async fn load_session(
        &self,
        scope: &Scope,
        symbols: &[Symbol],
        date: NaiveDate,
        session: SessionType,
        max_pages: usize,
    ) -> Result<LoadReport, ConfigurationError> {
        if max_pages == 0 {
            return Err(ConfigurationError::InvalidPageBound);
        }
        let window = self.calendar.resolve(date, session)?;
        let symbols: BTreeSet<&Symbol> = symbols.iter().collect();

        info!(
            %scope,
            window = %window,
            symbols = symbols.len(),
            max_pages,
            "loading session"
        );
        self.progress.start(symbols.len());

        let outcomes: BTreeMap<Symbol, SymbolOutcome> = stream::iter(symbols)
            .map(|symbol| self.load_symbol(scope, &window, symbol, max_pages))
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        let report = LoadReport {
            scope: scope.clone(),
            window,
            outcomes,
        };

        info!(
            %scope,
            symbols = report.len(),
            bars = report.total_bars(),
            failed = report.failures().count(),
            truncated = report.truncated().count(),
            "session loaded"
        );
        Ok(report)
    }

    /// Loads one symbol, retrying retryable fetch failures from page zero.
    async fn load_symbol(
        &self,
        scope: &Scope,
        window: &SessionWindow,
        symbol: &Symbol,
        max_pages: usize,
    ) -> (Symbol, SymbolOutcome) {
        let query = TradeQuery::new(symbol.clone(), window.start(), window.end());

        let (fetched, attempts) = match self.fetch_with_retry(&query, max_pages).await {
            Ok(fetched) => fetched,
            Err((error, attempts)) => {
                warn!(%symbol, attempts, error = %error, "symbol failed");
                self.progress.record_failed();
                return (symbol.clone(), SymbolOutcome::Failed { error, attempts });
            }
        };

        let bars = aggregate(&fetched.trades, &self.calendar);
        let summary = self
            .cache
            .put_all(scope, window.date(), symbol, &bars)
            .await;

        if !summary.is_complete() {
            warn!(%symbol, failed = summary.failed, "some bars were not cached");
        }
        if fetched.truncated {
            warn!(
                %symbol,
                pages = fetched.pages,
                bars = bars.len(),
                "fetch truncated by page bound; cached bars are incomplete"
            );
        }
        info!(
            %symbol,
            bars = summary.written,
            trades = fetched.trades.len(),
            pages = fetched.pages,
            "symbol loaded"
        );
        self.progress.record_loaded(summary.written);

        let load = SymbolLoad {
            bars_written: summary.written,
            write_failures: summary.failed,
            trades: fetched.trades.len(),
            pages: fetched.pages,
            truncated: fetched.truncated,
            attempts,
        };
        (symbol.clone(), SymbolOutcome::Loaded(load))
    }

    async fn fetch_with_retry(
        &self,
        query: &TradeQuery,
        max_pages: usize,
    ) -> Result<(FetchOutcome, u32), (UpstreamFetchError, u32)> {
        let policy = self.config.retry;
        let mut attempt = 0;
        loop {
            match fetch_trades(self.source.as_ref(), query, max_pages).await {
                Ok(outcome) => return Ok((outcome, attempt + 1)),
                Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                    let delay = policy.delay(attempt, &query.symbol);
                    warn!(
                        symbol = %query.symbol,
                        attempt = attempt + 1,
                        max_retries = policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying fetch"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err((e, attempt + 1)),
            }
        }
    }

    /// Point lookup of one cached bar.
    ///
    /// `None` means either the session was not loaded or the symbol did not
    /// trade in that minute; the [`LoadReport`] distinguishes the two.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be read.
    pub async fn get(
        &self,
        scope: &Scope,
        date: NaiveDate,
        symbol: &Symbol,
        label: MinuteLabel,
    ) -> Result<Option<MinuteBar>, CacheError> {
        let key = BarKey::new(scope, date, symbol, label);
        debug!(%key, "bar lookup");
        self.cache.get(key).await
    }

    /// Returns the session window with its ordered minute labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not configured or its boundaries
    /// do not exist on `date`.
    pub fn session_labels(
        &self,
        date: NaiveDate,
        session: SessionType,
    ) -> Result<SessionWindow, ConfigurationError> {
        self.calendar.resolve(date, session)
    }

    /// Reads back one symbol's cached session with its completeness ratio.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be resolved or the cache
    /// cannot be read.
    pub async fn coverage(
        &self,
        scope: &Scope,
        symbol: &Symbol,
        date: NaiveDate,
        session: SessionType,
    ) -> Result<SessionBars, LoaderError> {
        let window = self.session_labels(date, session)?;
        Ok(self.cache.get_session(scope, symbol, &window).await?)
    }
}
