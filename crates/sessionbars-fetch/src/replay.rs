//! Offline trade source replaying recorded trades.

use async_trait::async_trait;
use sessionbars_types::{Symbol, Trade};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};
use tracing::debug;

use crate::{Cursor, TradePage, TradeQuery, TradeSource, UpstreamFetchError};

/// A scripted page failure.
#[derive(Debug)]
struct PageFailure {
    symbol: Symbol,
    page: usize,
    status: u16,
    /// Remaining failing requests; `None` fails forever.
    remaining: Option<AtomicUsize>,
}

impl PageFailure {
    fn trips(&self, symbol: &Symbol, page: usize) -> bool {
        if &self.symbol != symbol || self.page != page {
            return false;
        }
        self.remaining.as_ref().is_none_or(|remaining| {
            remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        })
    }
}

/// Trade source serving recorded trades with provider-style paging.
///
/// Trades are filtered to the query window and split into pages of
/// `page_size`; the cursor encodes the offset of the next page. Failures
/// can be scripted per symbol and page to exercise error handling without
/// a network.
///
/// # Example
///
/// ```
/// use sessionbars_fetch::ReplaySource;
/// use sessionbars_types::{Symbol, Trade};
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 3, 11, 13, 30, 5).unwrap();
/// let source = ReplaySource::new(100)
///     .with_trades(Symbol::new("ABC").unwrap(), vec![Trade::new(ts, 100.0, 10.0)])
///     .with_failure(Symbol::new("XYZ").unwrap(), 0, 503);
/// assert_eq!(source.requests(), 0);
/// ```
#[derive(Debug)]
pub struct ReplaySource {
    trades: HashMap<Symbol, Vec<Trade>>,
    page_size: usize,
    failures: Vec<PageFailure>,
    requests: AtomicUsize,
}

impl ReplaySource {
    /// Creates an empty source serving `page_size` trades per page.
    ///
    /// A page size of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            trades: HashMap::new(),
            page_size: page_size.max(1),
            failures: Vec::new(),
            requests: AtomicUsize::new(0),
        }
    }

    /// Loads recorded trades from JSON of the form `{"ABC": [trade, ...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a symbol is invalid.
    pub fn from_json(json: &str, page_size: usize) -> Result<Self, serde_json::Error> {
        let recorded: HashMap<Symbol, Vec<Trade>> = serde_json::from_str(json)?;
        Ok(recorded
            .into_iter()
            .fold(Self::new(page_size), |source, (symbol, trades)| {
                source.with_trades(symbol, trades)
            }))
    }

    /// Adds recorded trades for a symbol, replacing any previous recording.
    #[must_use]
    pub fn with_trades(mut self, symbol: Symbol, mut trades: Vec<Trade>) -> Self {
        trades.sort_by_key(|t| t.timestamp);
        self.trades.insert(symbol, trades);
        self
    }

    /// Makes every request for the given page fail with `status`.
    #[must_use]
    pub fn with_failure(mut self, symbol: Symbol, page: usize, status: u16) -> Self {
        self.failures.push(PageFailure {
            symbol,
            page,
            status,
            remaining: None,
        });
        self
    }

    /// Makes the next `times` requests for the given page fail with `status`.
    #[must_use]
    pub fn with_transient_failure(
        mut self,
        symbol: Symbol,
        page: usize,
        status: u16,
        times: usize,
    ) -> Self {
        self.failures.push(PageFailure {
            symbol,
            page,
            status,
            remaining: Some(AtomicUsize::new(times)),
        });
        self
    }

    /// Returns the number of page requests served so far, failures included.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Returns the symbols with recorded trades.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.trades.keys()
    }
}

#[async_trait]
impl TradeSource for ReplaySource {
    async fn fetch_page(
        &self,
        query: &TradeQuery,
        cursor: Option<&Cursor>,
        page: usize,
    ) -> Result<TradePage, UpstreamFetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = self
            .failures
            .iter()
            .find(|f| f.trips(&query.symbol, page))
        {
            debug!(symbol = %query.symbol, page, status = failure.status, "replaying failure");
            return Err(UpstreamFetchError::Status {
                page,
                status: failure.status,
            });
        }

        let offset = match cursor {
            Some(cursor) => cursor
                .as_str()
                .parse::<usize>()
                .map_err(|e| UpstreamFetchError::Decode {
                    page,
                    message: format!("invalid replay cursor '{}': {e}", cursor.as_str()),
                })?,
            None => 0,
        };

        let in_window: Vec<Trade> = self
            .trades
            .get(&query.symbol)
            .map(|trades| {
                trades
                    .iter()
                    .filter(|t| query.contains(t.timestamp))
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        let end = (offset + self.page_size).min(in_window.len());
        let trades = in_window.get(offset..end).map(<[Trade]>::to_vec).unwrap_or_default();
        let next_cursor = (end < in_window.len()).then(|| Cursor::new(end.to_string()));

        Ok(TradePage {
            trades,
            next_cursor,
        })
    }
}
