//! HTTP client for the upstream trades API.

use reqwest::Client;
use std::time::Duration;

use crate::{TradePage, UpstreamFetchError, parse_trades_page, url::BASE_URL};

/// Configuration for the upstream client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API.
    pub base_url: String,
    /// API key appended to every request, if the provider needs one.
    pub api_key: Option<String>,
    /// Maximum trades per page requested from the provider.
    pub page_limit: u32,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            api_key: None,
            page_limit: 50_000, // Provider maximum
            timeout: Duration::from_secs(60),
            user_agent: format!("sessionbars/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("page_limit", &self.page_limit)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// HTTP client with connection pooling.
///
/// Each page is requested exactly once; a failed page aborts the fetch and
/// retry policy belongs to the caller.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    config: ClientConfig,
}

impl UpstreamClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            // Keep connections alive for reuse across pages and symbols
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Requests one page of trades and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamFetchError::Status`] for a non-success response,
    /// [`UpstreamFetchError::Transport`] if no response arrives, and
    /// [`UpstreamFetchError::Decode`] if the body is malformed.
    pub async fn fetch_page(&self, url: &str, page: usize) -> Result<TradePage, UpstreamFetchError> {
        let mut request = self.client.get(url);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("apiKey", key)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamFetchError::Transport {
                page,
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFetchError::Status {
                page,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamFetchError::Transport {
                page,
                message: e.without_url().to_string(),
            })?;

        parse_trades_page(&body, page)
    }
}
