//! Session loading orchestration for sessionbars.
//!
//! This crate composes the pipeline:
//!
//! - [`SessionLoader`] - Resolve window, fetch, aggregate, and cache per symbol
//! - [`LoaderConfig`] / [`RetryPolicy`] - Concurrency, TTL, and backoff settings
//! - [`LoadReport`] / [`SymbolOutcome`] - Per-symbol results
//! - [`LoadProgress`] - Shared progress counters

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod progress;
mod report;

pub use config::{LoaderConfig, RetryPolicy};
pub use error::LoaderError;
pub use loader::SessionLoader;
pub use progress::LoadProgress;
pub use report::{LoadReport, SymbolLoad, SymbolOutcome};
