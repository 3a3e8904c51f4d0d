//! Bounded cursor-following fetch.

use sessionbars_types::{ConfigurationError, Trade};
use tracing::{debug, warn};

use crate::{TradeQuery, TradeSource, UpstreamFetchError};

/// Result of fetching one symbol's trades for a window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Trades inside the query window, in provider order.
    pub trades: Vec<Trade>,
    /// Number of pages requested.
    pub pages: usize,
    /// True if the page bound was reached while a cursor was still available.
    ///
    /// A truncated outcome under-represents the window: later trades were
    /// never requested.
    pub truncated: bool,
    /// Trades the provider returned outside the query window.
    pub dropped: usize,
}

impl FetchOutcome {
    /// Returns true if the provider's cursor was exhausted.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !self.truncated
    }
}

/// Fetches every trade of `query`, following cursors for at most `max_pages`
/// pages.
///
/// Pages are requested strictly in sequence. The fetch ends when a page
/// carries no cursor, or when `max_pages` pages have been requested; in the
/// latter case the collected trades are returned with
/// [`FetchOutcome::truncated`] set. Trades outside `[start, end)` are
/// dropped and counted.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidPageBound`] if `max_pages` is zero.
/// Any page error aborts the fetch and is returned as-is; trades from
/// earlier pages are discarded.
pub async fn fetch_trades<S>(
    source: &S,
    query: &TradeQuery,
    max_pages: usize,
) -> Result<FetchOutcome, UpstreamFetchError>
where
    S: TradeSource + ?Sized,
{
    if max_pages == 0 {
        return Err(ConfigurationError::InvalidPageBound.into());
    }

    let mut outcome = FetchOutcome::default();
    let mut cursor = None;

    loop {
        let page = source
            .fetch_page(query, cursor.as_ref(), outcome.pages)
            .await?;
        outcome.pages += 1;

        let received = page.trades.len();
        let before = outcome.trades.len();
        outcome
            .trades
            .extend(page.trades.into_iter().filter(|t| query.contains(t.timestamp)));
        outcome.dropped += received - (outcome.trades.len() - before);

        match page.next_cursor {
            None => break,
            Some(_) if outcome.pages >= max_pages => {
                outcome.truncated = true;
                warn!(
                    symbol = %query.symbol,
                    pages = outcome.pages,
                    trades = outcome.trades.len(),
                    "page bound reached before end of data; result is truncated"
                );
                break;
            }
            next => cursor = next,
        }
    }

    debug!(
        symbol = %query.symbol,
        pages = outcome.pages,
        trades = outcome.trades.len(),
        dropped = outcome.dropped,
        truncated = outcome.truncated,
        "fetch finished"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cursor, ReplaySource, TradePage};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use sessionbars_types::Symbol;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, 13, 30, 0).unwrap()
    }

    fn query() -> TradeQuery {
        TradeQuery::new(
            Symbol::new("ABC").unwrap(),
            start(),
            start() + TimeDelta::minutes(390),
        )
    }

    fn replay(n: i64, page_size: usize) -> ReplaySource {
        let trades = (0..n)
            .map(|i| Trade::new(start() + TimeDelta::seconds(i * 30), 100.0 + i as f64, 1.0))
            .collect();
        ReplaySource::new(page_size).with_trades(Symbol::new("ABC").unwrap(), trades)
    }

    /// Serves fixed pages regardless of the window.
    #[derive(Debug)]
    struct FixedPages(Vec<TradePage>);

    #[async_trait]
    impl TradeSource for FixedPages {
        async fn fetch_page(
            &self,
            _query: &TradeQuery,
            _cursor: Option<&Cursor>,
            page: usize,
        ) -> Result<TradePage, UpstreamFetchError> {
            Ok(self.0[page].clone())
        }
    }

    #[tokio::test]
    async fn test_follows_cursor_to_end() {
        let source = replay(7, 3);
        let outcome = fetch_trades(&source, &query(), 50).await.unwrap();

        assert_eq!(outcome.trades.len(), 7);
        assert_eq!(outcome.pages, 3);
        assert!(!outcome.truncated);
        assert!(outcome.is_complete());
        assert_eq!(source.requests(), 3);
    }

    #[tokio::test]
    async fn test_page_bound_truncates() {
        let source = replay(7, 3);
        let outcome = fetch_trades(&source, &query(), 2).await.unwrap();

        assert_eq!(outcome.trades.len(), 6);
        assert_eq!(outcome.pages, 2);
        assert!(outcome.truncated);
        assert_eq!(source.requests(), 2);
    }

    #[tokio::test]
    async fn test_bound_equal_to_page_count_is_complete() {
        let source = replay(6, 3);
        let outcome = fetch_trades(&source, &query(), 2).await.unwrap();

        assert_eq!(outcome.trades.len(), 6);
        assert!(!outcome.truncated);
    }

    #[tokio::test]
    async fn test_zero_page_bound_is_rejected() {
        let source = replay(3, 3);
        let err = fetch_trades(&source, &query(), 0).await.unwrap_err();

        assert_eq!(
            err,
            UpstreamFetchError::Configuration(ConfigurationError::InvalidPageBound)
        );
        assert_eq!(source.requests(), 0);
    }

    #[tokio::test]
    async fn test_empty_first_page_is_not_an_error() {
        let source = replay(0, 3);
        let outcome = fetch_trades(&source, &query(), 5).await.unwrap();

        assert!(outcome.trades.is_empty());
        assert_eq!(outcome.pages, 1);
        assert!(!outcome.truncated);
    }

    #[tokio::test]
    async fn test_page_error_aborts_with_page_index() {
        let source = replay(10, 3).with_failure(Symbol::new("ABC").unwrap(), 2, 502);
        let err = fetch_trades(&source, &query(), 50).await.unwrap_err();

        assert_eq!(err.page(), Some(2));
        assert_eq!(err.status(), Some(502));
        assert_eq!(source.requests(), 3);
    }

    #[tokio::test]
    async fn test_out_of_window_trades_are_dropped() {
        let q = query();
        let source = FixedPages(vec![
            TradePage {
                trades: vec![
                    Trade::new(q.start - TimeDelta::seconds(1), 99.0, 1.0),
                    Trade::new(q.start, 100.0, 1.0),
                ],
                next_cursor: Some(Cursor::new("next")),
            },
            TradePage {
                trades: vec![
                    Trade::new(q.end - TimeDelta::seconds(1), 101.0, 1.0),
                    Trade::new(q.end, 102.0, 1.0),
                ],
                next_cursor: None,
            },
        ]);

        let outcome = fetch_trades(&source, &q, 10).await.unwrap();
        let prices: Vec<f64> = outcome.trades.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![100.0, 101.0]);
        assert_eq!(outcome.dropped, 2);
    }
}
