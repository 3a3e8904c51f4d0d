//! Upstream trade page decoding.

use serde::Deserialize;
use sessionbars_types::Trade;

use crate::{Cursor, TradePage, UpstreamFetchError};

/// Wire format of one trades page.
#[derive(Debug, Deserialize)]
struct TradesResponse {
    #[serde(default)]
    results: Vec<RawTrade>,
    #[serde(default)]
    next_url: Option<String>,
}

/// Wire format of one trade.
#[derive(Debug, Deserialize)]
struct RawTrade {
    /// SIP timestamp in nanoseconds since the Unix epoch.
    sip_timestamp: i64,
    price: f64,
    size: f64,
}

/// Decodes one page of the upstream trades response.
///
/// A missing `results` array is an empty page. A missing or empty
/// `next_url` means there are no further pages.
///
/// # Errors
///
/// Returns [`UpstreamFetchError::Decode`] if the body is not a valid
/// trades response.
pub fn parse_trades_page(body: &str, page: usize) -> Result<TradePage, UpstreamFetchError> {
    let response: TradesResponse =
        serde_json::from_str(body).map_err(|e| UpstreamFetchError::Decode {
            page,
            message: e.to_string(),
        })?;

    let trades = response
        .results
        .into_iter()
        .map(|raw| Trade::from_unix_nanos(raw.sip_timestamp, raw.price, raw.size))
        .collect();

    let next_cursor = response
        .next_url
        .filter(|url| !url.trim().is_empty())
        .map(Cursor::new);

    Ok(TradePage {
        trades,
        next_cursor,
    })
}
