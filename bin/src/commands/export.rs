//! Export command implementation.
//!
//! Writes one symbol's cached bars for a session, in label order.

use crate::setup::Backend;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use sessionbars_lib::{BarCache, OutputFormat, Scope, SessionType, Symbol, Ttl};
use std::{fs::File, io::BufWriter, path::PathBuf};
use tracing::info;

/// Export cached bars to a file or stdout.
pub(crate) async fn export(
    scope: &Scope,
    symbol: &Symbol,
    date: NaiveDate,
    session: SessionType,
    format: OutputFormat,
    output: Option<PathBuf>,
    backend: &Backend,
) -> Result<()> {
    let window = backend.calendar.resolve(date, session)?;
    let cache = BarCache::new(backend.open_store().await?, Ttl::default());
    let session_bars = cache.get_session(scope, symbol, &window).await?;

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            format.write_bars(symbol, &session_bars.bars, BufWriter::new(file))?;
            info!(
                path = %path.display(),
                bars = session_bars.found(),
                expected = session_bars.expected,
                "exported bars"
            );
        }
        None => format.write_bars(symbol, &session_bars.bars, std::io::stdout())?,
    }

    Ok(())
}
