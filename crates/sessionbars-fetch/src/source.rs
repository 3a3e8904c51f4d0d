//! Upstream trade sources.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sessionbars_types::{Symbol, Trade};
use tracing::debug;

use crate::{UpstreamClient, UpstreamFetchError, url::trades_url};

/// Opaque pagination token handed out by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Wraps a provider cursor.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw cursor token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of trades plus the cursor for the next page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradePage {
    /// Trades on this page, ascending by timestamp.
    pub trades: Vec<Trade>,
    /// Cursor for the next page; `None` is definitive end-of-data.
    pub next_cursor: Option<Cursor>,
}

/// Trades for one symbol inside `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeQuery {
    /// Symbol to fetch.
    pub symbol: Symbol,
    /// Window start (inclusive).
    pub start: DateTime<Utc>,
    /// Window end (exclusive).
    pub end: DateTime<Utc>,
}

impl TradeQuery {
    /// Creates a new query.
    #[must_use]
    pub const fn new(symbol: Symbol, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { symbol, start, end }
    }

    /// Returns true if the instant lies inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Page-at-a-time access to an upstream trade provider.
///
/// Pages for one query must be requested in cursor order: page `n`'s
/// cursor is only known once page `n - 1` has been returned.
#[async_trait]
pub trait TradeSource: Send + Sync + std::fmt::Debug {
    /// Fetches one page of trades.
    ///
    /// `cursor` is `None` for the first page. `page` is the zero-based page
    /// index, used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot produce the page.
    async fn fetch_page(
        &self,
        query: &TradeQuery,
        cursor: Option<&Cursor>,
        page: usize,
    ) -> Result<TradePage, UpstreamFetchError>;
}

/// REST trade provider.
///
/// The first page is requested with a timestamp-filtered query; later pages
/// follow the provider's `next_url` cursor verbatim.
#[derive(Debug, Clone)]
pub struct RestTradeSource {
    client: UpstreamClient,
}

impl RestTradeSource {
    /// Creates a source using the given client.
    #[must_use]
    pub const fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    #[must_use]
    pub const fn client(&self) -> &UpstreamClient {
        &self.client
    }
}

#[async_trait]
impl TradeSource for RestTradeSource {
    async fn fetch_page(
        &self,
        query: &TradeQuery,
        cursor: Option<&Cursor>,
        page: usize,
    ) -> Result<TradePage, UpstreamFetchError> {
        let url = match cursor {
            Some(cursor) => cursor.as_str().to_string(),
            None => {
                let config = self.client.config();
                trades_url(
                    &config.base_url,
                    query.symbol.as_str(),
                    query.start,
                    query.end,
                    config.page_limit,
                )
            }
        };
        debug!(symbol = %query.symbol, page, "requesting trades page");
        self.client.fetch_page(&url, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientConfig, fetch_trades};
    use chrono::TimeZone;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    async fn bind() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        (listener, base_url)
    }

    /// Serves one canned response per connection and returns the request
    /// lines it saw.
    fn serve(listener: TcpListener, responses: Vec<(u16, String)>) -> JoinHandle<Vec<String>> {
        tokio::spawn(async move {
            let mut request_lines = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&chunk[..n]);
                }
                let head = String::from_utf8_lossy(&head);
                request_lines.push(head.lines().next().unwrap_or_default().to_string());

                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
            request_lines
        })
    }

    fn rest_source(base_url: &str) -> RestTradeSource {
        let client = UpstreamClient::new(ClientConfig {
            base_url: base_url.to_string(),
            api_key: Some("secret".to_string()),
            page_limit: 2,
            ..ClientConfig::default()
        })
        .unwrap();
        RestTradeSource::new(client)
    }

    fn session_query() -> TradeQuery {
        TradeQuery::new(
            Symbol::new("ABC").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 11, 13, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 11, 20, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_rest_source_reappends_api_key_and_reports_failing_page() {
        let (listener, base_url) = bind().await;
        let first_page = format!(
            r#"{{"status":"OK","results":[{{"sip_timestamp":1710163805000000000,"price":100.0,"size":10}}],"next_url":"{base_url}/v3/trades/ABC?cursor=p2"}}"#
        );
        let server = serve(
            listener,
            vec![(200, first_page), (503, r#"{"status":"ERROR"}"#.to_string())],
        );

        let err = fetch_trades(&rest_source(&base_url), &session_query(), 10)
            .await
            .unwrap_err();
        assert_eq!(err, UpstreamFetchError::Status { page: 1, status: 503 });
        assert!(err.is_retryable());

        let requests = server.await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("GET /v3/trades/ABC?timestamp.gte=1710163800000000000"));
        assert!(requests[0].contains("limit=2"));
        assert!(requests[0].contains("apiKey=secret"));
        assert!(requests[1].starts_with("GET /v3/trades/ABC?cursor=p2&apiKey=secret "));
    }

    #[tokio::test]
    async fn test_rest_source_reads_pages_until_cursor_ends() {
        let (listener, base_url) = bind().await;
        let first_page = format!(
            r#"{{"status":"OK","results":[{{"sip_timestamp":1710163805000000000,"price":100.0,"size":10}}],"next_url":"{base_url}/v3/trades/ABC?cursor=p2"}}"#
        );
        let last_page =
            r#"{"status":"OK","results":[{"sip_timestamp":1710163865000000000,"price":101.0,"size":5}]}"#
                .to_string();
        let server = serve(listener, vec![(200, first_page), (200, last_page)]);

        let outcome = fetch_trades(&rest_source(&base_url), &session_query(), 10)
            .await
            .unwrap();
        assert_eq!(outcome.pages, 2);
        assert!(!outcome.truncated);
        let prices: Vec<f64> = outcome.trades.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![100.0, 101.0]);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_client_error_status_on_first_page() {
        let (listener, base_url) = bind().await;
        let server = serve(listener, vec![(403, r#"{"status":"NOT_AUTHORIZED"}"#.to_string())]);

        let err = rest_source(&base_url)
            .fetch_page(&session_query(), None, 0)
            .await
            .unwrap_err();
        assert_eq!(err, UpstreamFetchError::Status { page: 0, status: 403 });
        assert!(!err.is_retryable());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_a_transport_error() {
        let (listener, base_url) = bind().await;
        drop(listener);

        let err = rest_source(&base_url)
            .fetch_page(&session_query(), None, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamFetchError::Transport { page: 0, .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_query_contains_is_half_open() {
        let start = Utc.with_ymd_and_hms(2024, 3, 11, 13, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 11, 20, 0, 0).unwrap();
        let query = TradeQuery::new(Symbol::new("abc").unwrap(), start, end);

        assert!(query.contains(start));
        assert!(!query.contains(end));
    }

    #[test]
    fn test_cursor_is_opaque() {
        let cursor = Cursor::new("https://example.com/next?cursor=xyz");
        assert_eq!(cursor.as_str(), "https://example.com/next?cursor=xyz");
    }
}
