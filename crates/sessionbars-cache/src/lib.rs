//! Time-indexed minute bar cache for sessionbars.
//!
//! This crate provides the persistence layer for aggregated bars:
//!
//! - [`CacheStore`] - Key/value store with per-entry expiry
//! - [`MemoryStore`] - In-process store
//! - [`RedisStore`] - Redis store (requires the `redis` feature)
//! - [`BarKey`] - Cache key for one (scope, date, symbol, label)
//! - [`Ttl`] - Validated time-to-live
//! - [`BarCache`] - Typed minute bar reads and writes

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bars;
mod error;
mod key;
mod memory;
#[cfg(feature = "redis")]
mod redis;
mod store;
mod ttl;

pub use bars::{BarCache, SessionBars, WriteSummary};
pub use error::CacheError;
pub use key::{BarKey, KEY_PREFIX};
pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use redis::RedisStore;
pub use store::CacheStore;
pub use ttl::Ttl;
