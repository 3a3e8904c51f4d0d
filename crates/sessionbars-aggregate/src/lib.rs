//! Minute OHLCV aggregation for sessionbars.
//!
//! This crate provides trade-to-minute-bar aggregation:
//!
//! - [`MinuteBar`] - OHLCV bar for one exchange-local minute
//! - [`MinuteAggregator`] - Streaming aggregator keyed by minute label
//! - [`aggregate`] - One-shot aggregation of a trade list

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bar;

pub use aggregator::{MinuteAggregator, MinuteBars, aggregate};
pub use bar::MinuteBar;
