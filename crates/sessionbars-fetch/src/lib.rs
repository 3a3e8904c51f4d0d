//! Paginated upstream trade fetching for sessionbars.
//!
//! This crate provides the trade retrieval pipeline:
//!
//! - [`TradeSource`] - One-page-at-a-time access to an upstream provider
//! - [`fetch_trades`] - Bounded cursor-following fetch of a whole window
//! - [`RestTradeSource`] - REST provider backed by [`UpstreamClient`]
//! - [`ReplaySource`] - Replays recorded trades with provider-style paging
//! - [`url::trades_url`] - Constructs first-page trade query URLs

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod fetch;
mod parse;
mod replay;
mod source;
pub mod url;

pub use client::{ClientConfig, UpstreamClient};
pub use error::UpstreamFetchError;
pub use fetch::{FetchOutcome, fetch_trades};
pub use parse::parse_trades_page;
pub use replay::ReplaySource;
pub use source::{Cursor, RestTradeSource, TradePage, TradeQuery, TradeSource};
