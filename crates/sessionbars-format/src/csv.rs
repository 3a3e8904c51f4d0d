//! CSV output format.

use sessionbars_aggregate::MinuteBar;
use sessionbars_types::Symbol;
use std::{borrow::Cow, io::Write};

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

/// Quotes a field containing the delimiter, a quote, or a line break.
fn escape_field(field: &str, delimiter: char) -> Cow<'_, str> {
    if field.contains([delimiter, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        symbol: &Symbol,
        bars: &[MinuteBar],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;
        let symbol = escape_field(symbol.as_str(), d);

        if self.include_header {
            writeln!(
                writer,
                "symbol{d}label{d}timestamp{d}open{d}high{d}low{d}close{d}volume{d}trade_count"
            )?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{symbol}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.label,
                bar.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume,
                bar.trade_count
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
