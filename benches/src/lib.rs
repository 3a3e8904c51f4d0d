//! Synthetic trade streams for sessionbars benchmarks.
//!
//! Run with: `cargo bench --package sessionbars-bench`

use chrono::{NaiveDate, TimeDelta};
use sessionbars_lib::{ExchangeCalendar, SessionType, Symbol, Trade};

/// Benchmark session date (Monday of a DST-transition week).
pub fn bench_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 11).expect("valid date")
}

/// Benchmark symbol.
pub fn bench_symbol() -> Symbol {
    Symbol::new("BENCH").expect("valid symbol")
}

/// Generates an ascending trade stream over the regular session with
/// `trades_per_minute` evenly spaced prints per minute.
///
/// Prices follow a deterministic oscillation so highs and lows move within
/// each minute.
pub fn synthetic_session(trades_per_minute: u32) -> Vec<Trade> {
    let calendar = ExchangeCalendar::global();
    let Ok(window) = calendar.resolve(bench_date(), SessionType::Regular) else {
        return Vec::new();
    };

    let per_minute = i64::from(trades_per_minute.max(1));
    let spacing_ms = 60_000 / per_minute;
    let total = window.len() as i64 * per_minute;

    (0..total)
        .map(|i| {
            let timestamp = window.start() + TimeDelta::milliseconds(i * spacing_ms);
            let phase = i as f64 / 37.0;
            let price = 100.0 + phase.sin() * 2.5 + (i % 7) as f64 * 0.01;
            let size = 1.0 + (i % 13) as f64;
            Trade::new(timestamp, price, size)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_session_covers_every_label() {
        let trades = synthetic_session(3);
        assert_eq!(trades.len(), 390 * 3);

        let bars = sessionbars_lib::aggregate(&trades, ExchangeCalendar::global());
        assert_eq!(bars.len(), 390);
        assert!(bars.values().all(|bar| bar.trade_count == 3));
    }
}
