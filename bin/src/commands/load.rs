//! Load command implementation.
//!
//! This module primes the cache for one session: it fetches every symbol's
//! trades, aggregates minute bars, and writes them under a run scope.

use crate::{display::print_report, setup::Backend};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use sessionbars_lib::{
    ClientConfig, LoadProgress, LoaderConfig, ReplaySource, RestTradeSource, RetryPolicy, Scope,
    SessionLoader, SessionType, Symbol, TradeSource, Ttl, UpstreamClient,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::info;

/// Page size used when replaying recorded trades.
const REPLAY_PAGE_SIZE: usize = 50_000;

/// Arguments of the `load` command.
pub(crate) struct LoadOptions {
    pub(crate) scope: Option<Scope>,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) date: NaiveDate,
    pub(crate) session: SessionType,
    pub(crate) max_pages: usize,
    pub(crate) concurrency: usize,
    pub(crate) ttl_hours: u64,
    pub(crate) max_retries: u32,
    pub(crate) page_limit: u32,
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
    pub(crate) replay: Option<PathBuf>,
}

/// Load one session for a set of symbols.
pub(crate) async fn load(mut options: LoadOptions, backend: &Backend, quiet: bool) -> Result<()> {
    let (scope, generated) = run_scope(options.scope.take())?;
    if generated {
        // Printed even with --quiet
        println!("Scope: {scope}");
        info!(%scope, "generated run scope");
    }

    let ttl = Ttl::from_hours(options.ttl_hours)?;
    let config = LoaderConfig {
        concurrency: options.concurrency,
        ttl,
        retry: RetryPolicy {
            max_retries: options.max_retries,
            ..RetryPolicy::default()
        },
    };

    let source = trade_source(&options)?;
    let store = backend.open_store().await?;
    let progress = LoadProgress::new();
    let loader = SessionLoader::new(source, store, config)
        .with_calendar(backend.calendar.clone())
        .with_progress(progress.clone());

    // Setup spinner
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .context("Invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    let ticker = {
        let spinner = spinner.clone();
        let progress = progress.clone();
        tokio::spawn(async move {
            loop {
                spinner.set_message(progress.to_string());
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
        })
    };

    let result = loader
        .load_session(
            &scope,
            &options.symbols,
            options.date,
            options.session,
            options.max_pages,
        )
        .await;
    ticker.abort();
    spinner.finish_and_clear();

    let report = result?;
    if !quiet {
        print_report(&report);
    }

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{} out of {} symbols failed", failed, report.len());
    }

    Ok(())
}

/// Returns the explicit scope, or a fresh `run-<uuid>` scope flagged as
/// generated.
fn run_scope(explicit: Option<Scope>) -> Result<(Scope, bool)> {
    match explicit {
        Some(scope) => Ok((scope, false)),
        None => Ok((Scope::new(format!("run-{}", uuid::Uuid::new_v4()))?, true)),
    }
}

/// Builds the trade source: a replay file, or the REST API.
fn trade_source(options: &LoadOptions) -> Result<Arc<dyn TradeSource>> {
    if let Some(path) = &options.replay {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay file: {}", path.display()))?;
        let source = ReplaySource::from_json(&json, REPLAY_PAGE_SIZE)
            .with_context(|| format!("Invalid replay file: {}", path.display()))?;
        return Ok(Arc::new(source));
    }

    let mut config = ClientConfig {
        api_key: options.api_key.clone(),
        page_limit: options.page_limit,
        ..ClientConfig::default()
    };
    if let Some(base_url) = &options.base_url {
        config.base_url.clone_from(base_url);
    }
    let client = UpstreamClient::new(config).context("Failed to create HTTP client")?;
    Ok(Arc::new(RestTradeSource::new(client)))
}
