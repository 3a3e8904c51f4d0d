//! Upstream URL construction.

use chrono::{DateTime, Utc};

/// Default base URL of the upstream REST API.
pub const BASE_URL: &str = "https://api.polygon.io";

/// Returns nanoseconds since the Unix epoch, saturating outside chrono's
/// nanosecond range.
#[must_use]
pub fn unix_nanos(instant: DateTime<Utc>) -> i64 {
    instant
        .timestamp_nanos_opt()
        .unwrap_or_else(|| instant.timestamp().saturating_mul(1_000_000_000))
}

/// Builds the URL for the first page of trades in `[start, end)`.
///
/// URL format: `{base_url}/v3/trades/{SYMBOL}?timestamp.gte={ns}&timestamp.lt={ns}&order=asc&sort=timestamp&limit={limit}`
///
/// Later pages follow the provider's `next_url` cursor instead.
///
/// # Example
///
/// ```
/// use sessionbars_fetch::url::{BASE_URL, trades_url};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 3, 11, 13, 30, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 3, 11, 20, 0, 0).unwrap();
/// let url = trades_url(BASE_URL, "abc", start, end, 50_000);
/// assert_eq!(
///     url,
///     "https://api.polygon.io/v3/trades/ABC?timestamp.gte=1710163800000000000&timestamp.lt=1710187200000000000&order=asc&sort=timestamp&limit=50000"
/// );
/// ```
#[must_use]
pub fn trades_url(
    base_url: &str,
    symbol: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    limit: u32,
) -> String {
    format!(
        "{}/v3/trades/{}?timestamp.gte={}&timestamp.lt={}&order=asc&sort=timestamp&limit={}",
        base_url.trim_end_matches('/'),
        symbol.to_uppercase(),
        unix_nanos(start),
        unix_nanos(end),
        limit
    )
}
