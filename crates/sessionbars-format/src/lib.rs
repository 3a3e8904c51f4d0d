//! Export formatters for sessionbars minute bars.
//!
//! This crate writes cached bars to files or stdout:
//!
//! - [`CsvFormatter`] - CSV or TSV
//! - [`JsonFormatter`] - JSON array or NDJSON
//! - [`OutputFormat`] - Format selection by name or extension

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
