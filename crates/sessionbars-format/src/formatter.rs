//! Output format abstraction.

use serde::Serialize;
use sessionbars_aggregate::MinuteBar;
use sessionbars_types::Symbol;
use std::io::Write;
use thiserror::Error;

use crate::{CsvFormatter, JsonFormatter};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Tsv, Self::Json, Self::Ndjson]
    }

    /// Writes bars with this format's default formatter.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_bars<W: Write + Send>(
        &self,
        symbol: &Symbol,
        bars: &[MinuteBar],
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().write_bars(symbol, bars, writer),
            Self::Tsv => CsvFormatter::tsv().write_bars(symbol, bars, writer),
            Self::Json => JsonFormatter::new().write_bars(symbol, bars, writer),
            Self::Ndjson => JsonFormatter::ndjson().write_bars(symbol, bars, writer),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One exported row: a bar tagged with its symbol.
#[derive(Debug, Serialize)]
pub(crate) struct BarRecord<'a> {
    pub(crate) symbol: &'a Symbol,
    #[serde(flatten)]
    pub(crate) bar: &'a MinuteBar,
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes one symbol's bars, in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars<W: Write + Send>(
        &self,
        symbol: &Symbol,
        bars: &[MinuteBar],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}
