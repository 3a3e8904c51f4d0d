//! Minute OHLCV bar data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sessionbars_types::{MinuteLabel, Trade};

/// OHLCV bar for one exchange-local minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinuteBar {
    /// Exchange-local minute label the bar belongs to.
    pub label: MinuteLabel,
    /// Start of the minute (UTC).
    pub timestamp: DateTime<Utc>,
    /// Price of the first trade in the minute.
    pub open: f64,
    /// Highest trade price in the minute.
    pub high: f64,
    /// Lowest trade price in the minute.
    pub low: f64,
    /// Price of the last trade in the minute.
    pub close: f64,
    /// Sum of trade sizes.
    pub volume: f64,
    /// Number of trades in the minute.
    pub trade_count: u32,
}

impl MinuteBar {
    /// Opens a bar from the first trade of a minute.
    #[must_use]
    pub const fn open_with(label: MinuteLabel, timestamp: DateTime<Utc>, trade: &Trade) -> Self {
        Self {
            label,
            timestamp,
            open: trade.price,
            high: trade.price,
            low: trade.price,
            close: trade.price,
            volume: trade.size,
            trade_count: 1,
        }
    }

    /// Folds a later trade of the same minute into the bar.
    pub fn update(&mut self, trade: &Trade) {
        self.high = self.high.max(trade.price);
        self.low = self.low.min(trade.price);
        self.close = trade.price;
        self.volume += trade.size;
        self.trade_count += 1;
    }
}
