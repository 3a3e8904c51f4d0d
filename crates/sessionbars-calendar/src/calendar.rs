//! Exchange timezone and session-hours table.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sessionbars_types::{ConfigurationError, MinuteLabel, SessionType, parse_session_date};

use crate::SessionWindow;

/// The default exchange calendar embedded at compile time.
const EXCHANGE_JSON: &str = include_str!("../data/exchange.json");

/// Global default calendar instance.
static CALENDAR: OnceLock<ExchangeCalendar> = OnceLock::new();

/// Local civil hours of one session: `open` inclusive, `close` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHours {
    /// First minute of the session (exchange-local).
    pub open: MinuteLabel,
    /// Boundary minute ending the session (exchange-local, exclusive).
    pub close: MinuteLabel,
}

impl SessionHours {
    /// Returns the number of minute labels in the session.
    #[must_use]
    pub const fn minutes(&self) -> usize {
        self.close.minute_of_day().saturating_sub(self.open.minute_of_day()) as usize
    }
}

#[derive(Deserialize)]
struct CalendarDefinition {
    name: String,
    timezone: String,
    sessions: BTreeMap<SessionType, SessionHours>,
}

/// One exchange's timezone and session table.
///
/// All conversions between absolute instants and exchange-local minute
/// labels go through this type, so the label written for a bar and the
/// label used to look it up are always derived the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeCalendar {
    name: String,
    timezone: Tz,
    sessions: BTreeMap<SessionType, SessionHours>,
}

impl ExchangeCalendar {
    /// Creates a calendar, validating every session's hours.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSessionHours`] if a session's open
    /// is not strictly before its close.
    pub fn new(
        name: impl Into<String>,
        timezone: Tz,
        sessions: BTreeMap<SessionType, SessionHours>,
    ) -> Result<Self, ConfigurationError> {
        for (session, hours) in &sessions {
            if hours.open >= hours.close {
                return Err(ConfigurationError::InvalidSessionHours {
                    session: *session,
                    open: hours.open.to_string(),
                    close: hours.close.to_string(),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            timezone,
            sessions,
        })
    }

    /// Parses a calendar definition from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, names an unknown timezone,
    /// or contains invalid session hours.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let definition: CalendarDefinition = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::InvalidCalendar(e.to_string()))?;
        let timezone: Tz = definition
            .timezone
            .parse()
            .map_err(|_| ConfigurationError::UnknownTimezone(definition.timezone.clone()))?;
        Self::new(definition.name, timezone, definition.sessions)
    }

    /// Returns the default calendar (New York equities).
    ///
    /// The calendar is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        CALENDAR.get_or_init(Self::load)
    }

    /// Loads the calendar from the embedded JSON data.
    fn load() -> Self {
        Self::from_json(EXCHANGE_JSON).expect("Invalid exchange.json")
    }

    /// Returns the exchange name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the exchange timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the configured hours for a session type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::SessionNotConfigured`] if the calendar
    /// has no entry for the session type.
    pub fn hours(&self, session: SessionType) -> Result<SessionHours, ConfigurationError> {
        self.sessions
            .get(&session)
            .copied()
            .ok_or(ConfigurationError::SessionNotConfigured(session))
    }

    /// Returns the exchange-local minute label for an instant.
    ///
    /// The UTC offset is looked up for the instant itself, so daylight-saving
    /// transitions are honoured.
    #[must_use]
    pub fn label_for(&self, instant: DateTime<Utc>) -> MinuteLabel {
        MinuteLabel::from_time(instant.with_timezone(&self.timezone).time())
    }

    /// Converts an exchange-local date and minute to an absolute instant.
    ///
    /// An ambiguous local time (repeated hour when clocks fall back) resolves
    /// to the earlier instant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NonexistentLocalTime`] if the local time
    /// falls in a daylight-saving gap.
    pub fn local_to_utc(
        &self,
        date: NaiveDate,
        label: MinuteLabel,
    ) -> Result<DateTime<Utc>, ConfigurationError> {
        let local = date.and_time(label.to_time());
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or(ConfigurationError::NonexistentLocalTime(local))
    }

    /// Resolves a session to its UTC window and ordered minute labels.
    ///
    /// Labels are produced by walking local wall-clock minutes from the
    /// session open up to (not including) the close.
    ///
    /// # Errors
    ///
    /// Returns an error if the session type is not configured, a boundary
    /// does not exist in local time, or the session crosses a daylight-saving
    /// transition.
    pub fn resolve(
        &self,
        date: NaiveDate,
        session: SessionType,
    ) -> Result<SessionWindow, ConfigurationError> {
        let hours = self.hours(session)?;
        let start = self.local_to_utc(date, hours.open)?;
        let end = self.local_to_utc(date, hours.close)?;

        let labels: Vec<MinuteLabel> = (hours.open.minute_of_day()..hours.close.minute_of_day())
            .filter_map(MinuteLabel::from_minute_of_day)
            .collect();

        let elapsed_minutes = (end - start).num_minutes();
        if usize::try_from(elapsed_minutes).ok() != Some(labels.len()) {
            return Err(ConfigurationError::DiscontinuousSession {
                session,
                date,
                elapsed_minutes,
                labels: labels.len(),
            });
        }

        Ok(SessionWindow::new(date, session, start, end, labels))
    }

    /// Resolves a session from string inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the date or session type cannot be parsed, or if
    /// [`Self::resolve`] fails.
    pub fn resolve_str(&self, date: &str, session: &str) -> Result<SessionWindow, ConfigurationError> {
        let date = parse_session_date(date)?;
        let session: SessionType = session.parse()?;
        self.resolve(date, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn label(s: &str) -> MinuteLabel {
        s.parse().unwrap()
    }

    #[test]
    fn test_global_calendar_loads() {
        let calendar = ExchangeCalendar::global();
        assert_eq!(calendar.name(), "XNYS");
        assert_eq!(calendar.timezone(), chrono_tz::America::New_York);
        assert_eq!(calendar.hours(SessionType::Regular).unwrap().minutes(), 390);
    }

    #[test]
    fn test_regular_session_has_390_labels_across_dst() {
        let calendar = ExchangeCalendar::global();
        // Before and after the 2024 spring-forward and fall-back transitions.
        for d in [date(2024, 3, 8), date(2024, 3, 11), date(2024, 11, 1), date(2024, 11, 4)] {
            let window = calendar.resolve(d, SessionType::Regular).unwrap();
            let labels = window.labels();

            assert_eq!(labels.len(), 390, "{d}");
            assert_eq!(labels[0].to_string(), "09:30");
            assert_eq!(labels[389].to_string(), "15:59");
            assert!(labels.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_utc_window_shifts_with_dst() {
        let calendar = ExchangeCalendar::global();

        let est = calendar.resolve(date(2024, 3, 8), SessionType::Regular).unwrap();
        assert_eq!(est.start(), Utc.with_ymd_and_hms(2024, 3, 8, 14, 30, 0).unwrap());
        assert_eq!(est.end(), Utc.with_ymd_and_hms(2024, 3, 8, 21, 0, 0).unwrap());

        let edt = calendar.resolve(date(2024, 3, 11), SessionType::Regular).unwrap();
        assert_eq!(edt.start(), Utc.with_ymd_and_hms(2024, 3, 11, 13, 30, 0).unwrap());
        assert_eq!(edt.end(), Utc.with_ymd_and_hms(2024, 3, 11, 20, 0, 0).unwrap());

        assert_eq!(est.labels(), edt.labels());
    }

    #[test]
    fn test_extended_sessions() {
        let calendar = ExchangeCalendar::global();

        let pre = calendar.resolve(date(2024, 6, 3), SessionType::PreMarket).unwrap();
        assert_eq!(pre.len(), 330);
        assert_eq!(pre.labels()[0].to_string(), "04:00");
        assert_eq!(pre.labels().last().unwrap().to_string(), "09:29");

        let post = calendar.resolve(date(2024, 6, 3), SessionType::PostMarket).unwrap();
        assert_eq!(post.len(), 240);
        assert_eq!(post.labels().last().unwrap().to_string(), "19:59");
    }

    #[test]
    fn test_label_for_uses_exchange_local_time() {
        let calendar = ExchangeCalendar::global();

        // 13:30 UTC on a daylight-time date is 09:30 in New York.
        let edt = Utc.with_ymd_and_hms(2024, 3, 11, 13, 30, 42).unwrap();
        assert_eq!(calendar.label_for(edt), label("09:30"));

        // The same UTC wall-clock in standard time is 08:30 local.
        let est = Utc.with_ymd_and_hms(2024, 3, 8, 13, 30, 42).unwrap();
        assert_eq!(calendar.label_for(est), label("08:30"));
    }

    #[test]
    fn test_labels_round_trip_through_label_for() {
        let calendar = ExchangeCalendar::global();
        let d = date(2024, 3, 11);
        let window = calendar.resolve(d, SessionType::Regular).unwrap();

        for l in window.labels() {
            let instant = calendar.local_to_utc(d, *l).unwrap();
            assert_eq!(calendar.label_for(instant), *l);
            assert!(window.contains(instant));
        }
    }

    #[test]
    fn test_resolve_str_errors() {
        let calendar = ExchangeCalendar::global();
        assert_eq!(
            calendar.resolve_str("2024-02-30", "regular"),
            Err(ConfigurationError::InvalidDate("2024-02-30".to_string()))
        );
        assert_eq!(
            calendar.resolve_str("2024-03-11", "lunch"),
            Err(ConfigurationError::UnknownSessionType("lunch".to_string()))
        );
        assert!(calendar.resolve_str("2024-03-11", "regular").is_ok());
    }

    #[test]
    fn test_session_not_configured() {
        let mut sessions = BTreeMap::new();
        sessions.insert(
            SessionType::Regular,
            SessionHours {
                open: label("08:00"),
                close: label("16:30"),
            },
        );
        let calendar = ExchangeCalendar::new("XLON", chrono_tz::Europe::London, sessions).unwrap();

        assert_eq!(
            calendar.resolve(date(2024, 3, 11), SessionType::PreMarket),
            Err(ConfigurationError::SessionNotConfigured(SessionType::PreMarket))
        );
        assert_eq!(calendar.resolve(date(2024, 3, 11), SessionType::Regular).unwrap().len(), 510);
    }

    #[test]
    fn test_invalid_hours_rejected() {
        let mut sessions = BTreeMap::new();
        sessions.insert(
            SessionType::Regular,
            SessionHours {
                open: label("16:00"),
                close: label("09:30"),
            },
        );
        assert!(matches!(
            ExchangeCalendar::new("BAD", chrono_tz::UTC, sessions),
            Err(ConfigurationError::InvalidSessionHours { .. })
        ));
    }

    #[test]
    fn test_nonexistent_and_ambiguous_local_times() {
        let calendar = ExchangeCalendar::global();

        // 02:30 on 2024-03-10 is skipped in New York.
        assert!(matches!(
            calendar.local_to_utc(date(2024, 3, 10), label("02:30")),
            Err(ConfigurationError::NonexistentLocalTime(_))
        ));

        // 01:30 on 2024-11-03 happens twice; the earlier (EDT) instant wins.
        let ambiguous = calendar.local_to_utc(date(2024, 11, 3), label("01:30")).unwrap();
        assert_eq!(ambiguous, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "name": "TEST",
            "timezone": "Asia/Tokyo",
            "sessions": { "regular": { "open": "09:00", "close": "11:30" } }
        }"#;
        let calendar = ExchangeCalendar::from_json(json).unwrap();
        let window = calendar.resolve(date(2024, 3, 11), SessionType::Regular).unwrap();
        assert_eq!(window.len(), 150);
        assert_eq!(window.start(), Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());

        let bad_tz = json.replace("Asia/Tokyo", "Mars/Olympus");
        assert_eq!(
            ExchangeCalendar::from_json(&bad_tz),
            Err(ConfigurationError::UnknownTimezone("Mars/Olympus".to_string()))
        );
    }

    #[test]
    fn test_session_across_dst_transition_is_rejected() {
        let json = r#"{
            "name": "NIGHT",
            "timezone": "America/New_York",
            "sessions": { "pre": { "open": "01:00", "close": "04:00" } }
        }"#;
        let calendar = ExchangeCalendar::from_json(json).unwrap();

        // Spring forward: 180 labels but only 120 elapsed minutes.
        assert_eq!(
            calendar.resolve(date(2024, 3, 10), SessionType::PreMarket),
            Err(ConfigurationError::DiscontinuousSession {
                session: SessionType::PreMarket,
                date: date(2024, 3, 10),
                elapsed_minutes: 120,
                labels: 180,
            })
        );

        // Fall back: 240 elapsed minutes would share 180 labels.
        assert!(matches!(
            calendar.resolve(date(2024, 11, 3), SessionType::PreMarket),
            Err(ConfigurationError::DiscontinuousSession { elapsed_minutes: 240, labels: 180, .. })
        ));

        assert_eq!(calendar.resolve(date(2024, 3, 11), SessionType::PreMarket).unwrap().len(), 180);
    }

    #[test]
    fn test_default_sessions_resolve_on_transition_days() {
        let calendar = ExchangeCalendar::global();
        for d in [date(2024, 3, 10), date(2024, 11, 3)] {
            for session in SessionType::all() {
                assert!(calendar.resolve(d, *session).is_ok(), "{d} {session}");
            }
        }
    }
}
