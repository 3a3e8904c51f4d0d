//! Minute-bar session cache for exchange trade data.
//!
//! This is a facade crate that re-exports functionality from the sessionbars
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use sessionbars_lib::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UpstreamClient::new(ClientConfig {
//!         api_key: Some("YOUR_KEY".to_string()),
//!         ..ClientConfig::default()
//!     })?;
//!     let loader = SessionLoader::new(
//!         Arc::new(RestTradeSource::new(client)),
//!         Arc::new(MemoryStore::new()),
//!         LoaderConfig::default(),
//!     );
//!
//!     let scope = Scope::new("run-1")?;
//!     let date = parse_session_date("2024-03-11")?;
//!     let symbols = [Symbol::new("ABC")?];
//!     let report = loader
//!         .load_session(&scope, &symbols, date, SessionType::Regular, 50)
//!         .await?;
//!     println!("{} bars cached", report.total_bars());
//!
//!     let open = MinuteLabel::from_hm(9, 30).ok_or("bad label")?;
//!     if let Some(bar) = loader.get(&scope, date, &symbols[0], open).await? {
//!         println!("09:30 close: {}", bar.close);
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use sessionbars_types::*;

// Re-export the session calendar
pub use sessionbars_calendar::{ExchangeCalendar, SessionHours, SessionWindow};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use sessionbars_fetch::{
    ClientConfig, Cursor, FetchOutcome, ReplaySource, RestTradeSource, TradePage, TradeQuery,
    TradeSource, UpstreamClient, UpstreamFetchError, fetch_trades, url,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use sessionbars_aggregate::{MinuteAggregator, MinuteBar, MinuteBars, aggregate};

// Re-export the cache
#[cfg(feature = "cache")]
pub use sessionbars_cache::{
    BarCache, BarKey, CacheError, CacheStore, MemoryStore, SessionBars, Ttl, WriteSummary,
};

#[cfg(feature = "redis")]
pub use sessionbars_cache::RedisStore;

// Re-export the loader
#[cfg(feature = "loader")]
pub use sessionbars_loader::{
    LoadProgress, LoadReport, LoaderConfig, LoaderError, RetryPolicy, SessionLoader, SymbolLoad,
    SymbolOutcome,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use sessionbars_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

/// Prelude module for convenient imports.
///
/// ```
/// use sessionbars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use sessionbars_types::{
        ConfigurationError, MinuteLabel, Scope, SessionType, Symbol, Trade, parse_session_date,
    };

    pub use sessionbars_calendar::{ExchangeCalendar, SessionWindow};

    #[cfg(feature = "fetch")]
    pub use sessionbars_fetch::{
        ClientConfig, RestTradeSource, TradeSource, UpstreamClient, UpstreamFetchError,
    };

    #[cfg(feature = "aggregate")]
    pub use sessionbars_aggregate::{MinuteBar, aggregate};

    #[cfg(feature = "cache")]
    pub use sessionbars_cache::{CacheStore, MemoryStore, Ttl};

    #[cfg(feature = "redis")]
    pub use sessionbars_cache::RedisStore;

    #[cfg(feature = "loader")]
    pub use sessionbars_loader::{LoadReport, LoaderConfig, SessionLoader, SymbolOutcome};

    #[cfg(feature = "format")]
    pub use sessionbars_format::{Formatter, OutputFormat};
}
