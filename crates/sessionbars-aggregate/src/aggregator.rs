//! Trade-to-minute-bar aggregation.

use std::borrow::Cow;

use chrono::{DurationRound, TimeDelta};
use indexmap::IndexMap;
use sessionbars_calendar::ExchangeCalendar;
use sessionbars_types::{MinuteLabel, Trade};

use crate::MinuteBar;

/// Minute bars keyed by exchange-local label, in first-seen order.
pub type MinuteBars = IndexMap<MinuteLabel, MinuteBar>;

/// Streaming minute-bar aggregator.
///
/// Trades must be fed in ascending timestamp order: the first trade of a
/// label sets its open and the last one sets its close. Use [`aggregate`]
/// when the input order is not guaranteed.
///
/// Labels come from [`ExchangeCalendar::label_for`], the same derivation the
/// session resolver and cache lookups use.
#[derive(Debug)]
pub struct MinuteAggregator<'a> {
    calendar: &'a ExchangeCalendar,
    bars: MinuteBars,
}

impl<'a> MinuteAggregator<'a> {
    /// Creates a new aggregator labelling minutes in the calendar's timezone.
    #[must_use]
    pub fn new(calendar: &'a ExchangeCalendar) -> Self {
        Self {
            calendar,
            bars: MinuteBars::new(),
        }
    }

    /// Folds one trade into the bar for its minute label.
    pub fn process(&mut self, trade: &Trade) {
        let label = self.calendar.label_for(trade.timestamp);
        match self.bars.get_mut(&label) {
            Some(bar) => bar.update(trade),
            None => {
                let minute_start = trade
                    .timestamp
                    .duration_trunc(TimeDelta::minutes(1))
                    .unwrap_or(trade.timestamp);
                self.bars
                    .insert(label, MinuteBar::open_with(label, minute_start, trade));
            }
        }
    }

    /// Returns the number of minutes that have at least one trade.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if no trades have been processed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Finishes aggregation, returning one bar per label with trades.
    #[must_use]
    pub fn finish(self) -> MinuteBars {
        self.bars
    }
}

/// Aggregates a trade list into minute bars.
///
/// Trades are stably sorted by timestamp first if they are not already in
/// order, so the result depends only on the trade list. Minutes without
/// trades are absent from the result rather than zero-filled.
#[must_use]
pub fn aggregate(trades: &[Trade], calendar: &ExchangeCalendar) -> MinuteBars {
    let trades: Cow<'_, [Trade]> = if trades.is_sorted_by_key(|t| t.timestamp) {
        Cow::Borrowed(trades)
    } else {
        let mut sorted = trades.to_vec();
        sorted.sort_by_key(|t| t.timestamp);
        Cow::Owned(sorted)
    };

    let mut aggregator = MinuteAggregator::new(calendar);
    for trade in trades.iter() {
        aggregator.process(trade);
    }
    aggregator.finish()
}
