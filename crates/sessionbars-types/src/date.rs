//! Session date parsing.

use chrono::NaiveDate;

use crate::ConfigurationError;

/// Format used for session dates in keys and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an exchange calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidDate`] if the string is not a valid
/// calendar date (e.g. `2024-02-30`).
pub fn parse_session_date(s: &str) -> Result<NaiveDate, ConfigurationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ConfigurationError::InvalidDate(s.to_string()))
}
