//! Coverage command implementation.

use crate::{display::print_coverage_row, setup::Backend};
use anyhow::Result;
use chrono::NaiveDate;
use sessionbars_lib::{BarCache, Scope, SessionType, Symbol, Ttl};

/// Report found vs. expected bars for each symbol.
pub(crate) async fn coverage(
    scope: &Scope,
    symbols: &[Symbol],
    date: NaiveDate,
    session: SessionType,
    backend: &Backend,
) -> Result<()> {
    let window = backend.calendar.resolve(date, session)?;
    let cache = BarCache::new(backend.open_store().await?, Ttl::default());

    println!("Session: {window}");
    println!(
        "{:<10} {:>11} {:>8}  FIRST - LAST",
        "SYMBOL", "FOUND", "COMPLETE"
    );
    println!("{}", "-".repeat(50));

    for symbol in symbols {
        let bars = cache.get_session(scope, symbol, &window).await?;
        print_coverage_row(symbol, &bars);
    }

    Ok(())
}
