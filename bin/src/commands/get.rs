//! Get command implementation.

use crate::setup::Backend;
use anyhow::Result;
use chrono::NaiveDate;
use sessionbars_lib::{BarCache, BarKey, MinuteLabel, Scope, Symbol, Ttl};

/// Look up one cached bar and print it as JSON.
pub(crate) async fn get(
    scope: &Scope,
    date: NaiveDate,
    symbol: &Symbol,
    label: MinuteLabel,
    backend: &Backend,
) -> Result<()> {
    let cache = BarCache::new(backend.open_store().await?, Ttl::default());
    let key = BarKey::new(scope, date, symbol, label);

    match cache.get(key).await? {
        Some(bar) => println!("{}", serde_json::to_string_pretty(&bar)?),
        None => println!("{key}: absent (no trades in that minute, or session not loaded)"),
    }

    Ok(())
}
