//! Trade data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single upstream trade print.
///
/// Trades within one fetch arrive sorted ascending by timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Timestamp of the trade (UTC, nanosecond precision).
    pub timestamp: DateTime<Utc>,
    /// Execution price.
    pub price: f64,
    /// Number of shares (fractional sizes are allowed).
    pub size: f64,
}

impl Trade {
    /// Creates a new trade.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, price: f64, size: f64) -> Self {
        Self {
            timestamp,
            price,
            size,
        }
    }

    /// Creates a trade from a Unix timestamp in nanoseconds.
    #[must_use]
    pub fn from_unix_nanos(nanos: i64, price: f64, size: f64) -> Self {
        Self::new(DateTime::from_timestamp_nanos(nanos), price, size)
    }
}
