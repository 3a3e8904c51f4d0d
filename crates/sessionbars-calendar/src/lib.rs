//! Exchange calendar and session window resolution for sessionbars.
//!
//! This crate turns calendar dates into absolute trading windows:
//!
//! - [`ExchangeCalendar`] - Exchange timezone plus session-hours table
//! - [`SessionHours`] - Local open (inclusive) and close (exclusive) of a session
//! - [`SessionWindow`] - Resolved UTC interval and ordered minute labels
//!
//! # Example
//!
//! ```
//! use sessionbars_calendar::ExchangeCalendar;
//! use sessionbars_types::SessionType;
//! use chrono::NaiveDate;
//!
//! let calendar = ExchangeCalendar::global();
//! let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
//! let window = calendar.resolve(date, SessionType::Regular).unwrap();
//!
//! assert_eq!(window.len(), 390);
//! assert_eq!(window.labels()[0].to_string(), "09:30");
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod calendar;
mod window;

pub use calendar::{ExchangeCalendar, SessionHours};
pub use window::SessionWindow;
