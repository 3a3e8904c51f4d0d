//! Resolved session windows.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use sessionbars_types::{MinuteLabel, SessionType};

/// A session resolved against an exchange calendar.
///
/// Holds the absolute `[start, end)` interval and the canonical ordered
/// list of exchange-local minute labels. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionWindow {
    date: NaiveDate,
    session: SessionType,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    labels: Vec<MinuteLabel>,
}

impl SessionWindow {
    pub(crate) const fn new(
        date: NaiveDate,
        session: SessionType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        labels: Vec<MinuteLabel>,
    ) -> Self {
        Self {
            date,
            session,
            start,
            end,
            labels,
        }
    }

    /// Returns the exchange calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the session type.
    #[must_use]
    pub const fn session(&self) -> SessionType {
        self.session
    }

    /// Returns the session start (inclusive, UTC).
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the session end (exclusive, UTC).
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the absolute length of the session.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns the expected minute labels in chronological order.
    #[must_use]
    pub fn labels(&self) -> &[MinuteLabel] {
        &self.labels
    }

    /// Returns the number of expected minute labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the session has no minutes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns true if the instant lies inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Returns true if the label is one of the session's expected labels.
    #[must_use]
    pub fn contains_label(&self, label: MinuteLabel) -> bool {
        self.labels.binary_search(&label).is_ok()
    }

    /// Returns `found / expected` as a ratio in `[0, 1]`.
    ///
    /// An empty session reports full coverage.
    #[must_use]
    pub fn completeness(&self, found: usize) -> f64 {
        if self.labels.is_empty() {
            return 1.0;
        }
        (found.min(self.labels.len()) as f64) / (self.labels.len() as f64)
    }
}

impl std::fmt::Display for SessionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} [{} .. {})",
            self.date,
            self.session,
            self.start.format("%Y-%m-%dT%H:%M:%SZ"),
            self.end.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::ExchangeCalendar;
    use chrono::{NaiveDate, TimeZone, Utc};
    use sessionbars_types::SessionType;

    #[test]
    fn test_contains_is_half_open() {
        let calendar = ExchangeCalendar::global();
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let window = calendar.resolve(date, SessionType::Regular).unwrap();

        assert!(window.contains(window.start()));
        assert!(!window.contains(window.end()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 3, 11, 13, 29, 59).unwrap()));
        assert_eq!(window.duration().num_minutes(), 390);
    }

    #[test]
    fn test_contains_label() {
        let calendar = ExchangeCalendar::global();
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let window = calendar.resolve(date, SessionType::Regular).unwrap();

        assert!(window.contains_label("09:30".parse().unwrap()));
        assert!(window.contains_label("15:59".parse().unwrap()));
        assert!(!window.contains_label("16:00".parse().unwrap()));
        assert!(!window.contains_label("09:29".parse().unwrap()));
    }

    #[test]
    fn test_completeness_ratio() {
        let calendar = ExchangeCalendar::global();
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let window = calendar.resolve(date, SessionType::Regular).unwrap();

        assert!((window.completeness(390) - 1.0).abs() < f64::EPSILON);
        assert!((window.completeness(195) - 0.5).abs() < f64::EPSILON);
        assert!(window.completeness(0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        let calendar = ExchangeCalendar::global();
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let window = calendar.resolve(date, SessionType::Regular).unwrap();
        assert_eq!(
            window.to_string(),
            "2024-03-11 regular [2024-03-11T13:30:00Z .. 2024-03-11T20:00:00Z)"
        );
    }
}
