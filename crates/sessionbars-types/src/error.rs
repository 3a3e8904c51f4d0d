//! Error types for sessionbars configuration.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::SessionType;

/// Errors caused by invalid caller input or settings.
///
/// These are never retried; they surface immediately to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The date string is not a valid calendar date.
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The session type string is not recognized.
    #[error("Unknown session type '{0}', expected one of: pre, regular, post")]
    UnknownSessionType(String),

    /// The exchange calendar has no hours for the requested session type.
    #[error("Session type '{0}' is not configured for this exchange")]
    SessionNotConfigured(SessionType),

    /// A session's open is not strictly before its close.
    #[error("Invalid hours for session '{session}': open {open} must precede close {close}")]
    InvalidSessionHours {
        /// The session type with bad hours.
        session: SessionType,
        /// Configured local open.
        open: String,
        /// Configured local close.
        close: String,
    },

    /// A session boundary falls in a daylight-saving gap.
    #[error("Local time {0} does not exist in the exchange timezone")]
    NonexistentLocalTime(NaiveDateTime),

    /// A session crosses a daylight-saving transition, so its local minute
    /// labels do not map one-to-one onto elapsed minutes.
    #[error(
        "Session '{session}' on {date} spans a daylight-saving transition: \
         {elapsed_minutes} elapsed minutes but {labels} local minute labels"
    )]
    DiscontinuousSession {
        /// The affected session type.
        session: SessionType,
        /// The session date.
        date: NaiveDate,
        /// Minutes between the UTC start and end.
        elapsed_minutes: i64,
        /// Number of local wall-clock labels.
        labels: usize,
    },

    /// The timezone name is not in the IANA database.
    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    /// The exchange calendar definition could not be parsed.
    #[error("Invalid exchange calendar: {0}")]
    InvalidCalendar(String),

    /// The minute label is not a valid `HH:MM` string.
    #[error("Invalid minute label '{0}', expected HH:MM")]
    InvalidLabel(String),

    /// The scope identifier is empty or contains a reserved character.
    #[error("Invalid scope '{0}': must be non-empty and must not contain ':' or whitespace")]
    InvalidScope(String),

    /// The symbol is empty or contains a reserved character.
    #[error("Invalid symbol '{0}': must be non-empty and must not contain ':' or whitespace")]
    InvalidSymbol(String),

    /// The page bound for a fetch must be at least one.
    #[error("Page bound must be at least 1")]
    InvalidPageBound,

    /// The cache TTL is shorter than the allowed minimum.
    #[error("Cache TTL of {actual_secs}s is shorter than the minimum of {minimum_secs}s")]
    TtlTooShort {
        /// Requested TTL in seconds.
        actual_secs: u64,
        /// Minimum TTL in seconds.
        minimum_secs: u64,
    },
}
