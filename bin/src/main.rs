//! sessionbars CLI - load, query, and export cached session minute bars.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use chrono::NaiveDate;
use sessionbars_lib::{MinuteLabel, OutputFormat, Scope, SessionType, Symbol, parse_session_date};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;
mod setup;

#[derive(Parser)]
#[command(name = "sessionbars")]
#[command(about = "Minute-bar session cache for exchange trade data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only, no progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Redis URL for the bar cache (in-process memory when omitted)
    #[arg(long, env = "SESSIONBARS_REDIS_URL", global = true)]
    redis_url: Option<String>,

    /// Exchange calendar JSON file (built-in XNYS calendar when omitted)
    #[arg(long, env = "SESSIONBARS_CALENDAR", global = true)]
    calendar: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, aggregate, and cache one session for a set of symbols
    Load {
        /// Symbols to load (e.g., AAPL MSFT)
        #[arg(required = true)]
        symbols: Vec<Symbol>,

        /// Session date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_session_date)]
        date: NaiveDate,

        /// Session type (pre, regular, post)
        #[arg(short, long, default_value = "regular")]
        session: SessionType,

        /// Run scope to write under. A fresh run-<uuid> scope when omitted.
        #[arg(long)]
        scope: Option<Scope>,

        /// Maximum pages fetched per symbol
        #[arg(long, default_value = "50")]
        max_pages: usize,

        /// Maximum symbols loaded concurrently
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Cache TTL in hours (at least 1)
        #[arg(long, default_value = "24")]
        ttl_hours: u64,

        /// Retries per symbol for rate limits and server errors
        #[arg(long, default_value = "3")]
        max_retries: u32,

        /// Trades requested per page
        #[arg(long, default_value = "50000")]
        page_limit: u32,

        /// Upstream API key
        #[arg(long, env = "SESSIONBARS_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Upstream base URL
        #[arg(long, env = "SESSIONBARS_BASE_URL")]
        base_url: Option<String>,

        /// Replay recorded trades from a JSON file instead of the upstream API
        #[arg(long)]
        replay: Option<PathBuf>,
    },

    /// Look up one cached bar
    Get {
        /// Ticker symbol
        symbol: Symbol,

        /// Exchange-local minute label (HH:MM)
        label: MinuteLabel,

        /// Session date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_session_date)]
        date: NaiveDate,

        /// Run scope
        #[arg(long)]
        scope: Scope,
    },

    /// Show a session's UTC window and minute labels
    Labels {
        /// Session date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_session_date)]
        date: NaiveDate,

        /// Session type (pre, regular, post)
        #[arg(short, long, default_value = "regular")]
        session: SessionType,

        /// Print only the window and label count
        #[arg(long)]
        summary: bool,
    },

    /// Report cached bars found per symbol against the session's labels
    Coverage {
        /// Symbols to check
        #[arg(required = true)]
        symbols: Vec<Symbol>,

        /// Session date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_session_date)]
        date: NaiveDate,

        /// Session type (pre, regular, post)
        #[arg(short, long, default_value = "regular")]
        session: SessionType,

        /// Run scope
        #[arg(long)]
        scope: Scope,
    },

    /// Export a symbol's cached bars for a session
    Export {
        /// Ticker symbol
        symbol: Symbol,

        /// Session date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_session_date)]
        date: NaiveDate,

        /// Session type (pre, regular, post)
        #[arg(short, long, default_value = "regular")]
        session: SessionType,

        /// Run scope
        #[arg(long)]
        scope: Scope,

        /// Output format (csv, tsv, json, ndjson)
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Output file path. Writes to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let calendar = setup::load_calendar(cli.calendar.as_deref())?;
    let backend = setup::Backend::new(calendar, cli.redis_url);

    match command {
        Commands::Load {
            symbols,
            date,
            session,
            scope,
            max_pages,
            concurrency,
            ttl_hours,
            max_retries,
            page_limit,
            api_key,
            base_url,
            replay,
        } => {
            let options = commands::load::LoadOptions {
                scope,
                symbols,
                date,
                session,
                max_pages,
                concurrency,
                ttl_hours,
                max_retries,
                page_limit,
                api_key,
                base_url,
                replay,
            };
            commands::load::load(options, &backend, cli.quiet).await
        }
        Commands::Get {
            symbol,
            label,
            date,
            scope,
        } => commands::get::get(&scope, date, &symbol, label, &backend).await,
        Commands::Labels {
            date,
            session,
            summary,
        } => commands::labels::labels(&backend.calendar, date, session, summary),
        Commands::Coverage {
            symbols,
            date,
            session,
            scope,
        } => {
            commands::coverage::coverage(&scope, &symbols, date, session, &backend).await
        }
        Commands::Export {
            symbol,
            date,
            session,
            scope,
            format,
            output,
        } => {
            commands::export::export(&scope, &symbol, date, session, format, output, &backend)
                .await
        }
    }
}
