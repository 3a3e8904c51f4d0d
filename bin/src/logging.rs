//! Tracing subscriber setup.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Installs the global subscriber, writing to stderr.
///
/// The default level comes from `-v` (warn, info, debug, trace) or `--quiet`
/// (error); `RUST_LOG` directives override it.
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
