//! Cache key composition.

use chrono::NaiveDate;
use sessionbars_types::{DATE_FORMAT, MinuteLabel, Scope, Symbol};

/// Prefix shared by every minute bar key.
pub const KEY_PREFIX: &str = "minute_bar";

/// Key of one cached minute bar.
///
/// Renders as `minute_bar:{scope}:{date}:{symbol}:{label}`, for example
/// `minute_bar:run-1:2024-03-11:ABC:09:30`. Writes and reads build keys only
/// through this type, and the label is always an exchange-local
/// [`MinuteLabel`], so both paths agree by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarKey<'a> {
    /// Tenant/run scope.
    pub scope: &'a Scope,
    /// Exchange calendar date.
    pub date: NaiveDate,
    /// Ticker symbol.
    pub symbol: &'a Symbol,
    /// Exchange-local minute label.
    pub label: MinuteLabel,
}

impl<'a> BarKey<'a> {
    /// Creates a new key.
    #[must_use]
    pub const fn new(
        scope: &'a Scope,
        date: NaiveDate,
        symbol: &'a Symbol,
        label: MinuteLabel,
    ) -> Self {
        Self {
            scope,
            date,
            symbol,
            label,
        }
    }
}

impl std::fmt::Display for BarKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{KEY_PREFIX}:{}:{}:{}:{}",
            self.scope,
            self.date.format(DATE_FORMAT),
            self.symbol,
            self.label
        )
    }
}
