//! Core types for the sessionbars minute-bar cache.
//!
//! This crate provides the fundamental data structures used throughout sessionbars:
//!
//! - [`Trade`] - A single upstream trade with timestamp, price, and size
//! - [`SessionType`] - Pre-market, regular, or post-market trading window
//! - [`MinuteLabel`] - Exchange-local `HH:MM` minute label
//! - [`Scope`] - Tenant/run identifier isolating cache entries
//! - [`Symbol`] - Normalized ticker symbol
//! - [`ConfigurationError`] - Invalid dates, session types, and settings

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date;
mod error;
mod label;
mod scope;
mod session;
mod trade;

pub use date::{DATE_FORMAT, parse_session_date};
pub use error::ConfigurationError;
pub use label::MinuteLabel;
pub use scope::{Scope, Symbol};
pub use session::SessionType;
pub use trade::Trade;
