//! Per-symbol load results.

use sessionbars_calendar::SessionWindow;
use sessionbars_fetch::UpstreamFetchError;
use sessionbars_types::{Scope, Symbol};
use std::collections::BTreeMap;

/// Statistics for a symbol whose trades were fetched and cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolLoad {
    /// Bars written to the cache.
    pub bars_written: usize,
    /// Bars the cache failed to store.
    pub write_failures: usize,
    /// Trades aggregated.
    pub trades: usize,
    /// Pages fetched on the successful attempt.
    pub pages: usize,
    /// True if the page bound cut the fetch short.
    pub truncated: bool,
    /// Fetch attempts made, including the successful one.
    pub attempts: u32,
}

impl SymbolLoad {
    /// Returns the number of bars produced by aggregation.
    #[must_use]
    pub const fn bars(&self) -> usize {
        self.bars_written + self.write_failures
    }
}

/// Outcome of loading one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolOutcome {
    /// Trades were fetched, aggregated, and written.
    Loaded(SymbolLoad),
    /// The fetch failed on every attempt.
    Failed {
        /// Error from the last attempt.
        error: UpstreamFetchError,
        /// Attempts made.
        attempts: u32,
    },
}

impl SymbolOutcome {
    /// Returns the load statistics if the symbol loaded.
    #[must_use]
    pub const fn loaded(&self) -> Option<&SymbolLoad> {
        match self {
            Self::Loaded(load) => Some(load),
            Self::Failed { .. } => None,
        }
    }

    /// Returns the bars written, if the symbol loaded.
    #[must_use]
    pub const fn bars_written(&self) -> Option<usize> {
        match self {
            Self::Loaded(load) => Some(load.bars_written),
            Self::Failed { .. } => None,
        }
    }

    /// Returns the error, if the symbol failed.
    #[must_use]
    pub const fn error(&self) -> Option<&UpstreamFetchError> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    /// Returns true if the symbol failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns true if the symbol loaded from a truncated fetch.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Loaded(SymbolLoad { truncated: true, .. }))
    }
}

/// Result of [`SessionLoader::load_session`](crate::SessionLoader::load_session).
///
/// Every requested symbol has exactly one outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Scope the bars were written under.
    pub scope: Scope,
    /// Session window that was loaded.
    pub window: SessionWindow,
    /// Outcome per symbol.
    pub outcomes: BTreeMap<Symbol, SymbolOutcome>,
}

impl LoadReport {
    /// Returns the outcome for a symbol.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&SymbolOutcome> {
        self.outcomes.get(symbol)
    }

    /// Returns bars written per loaded symbol.
    #[must_use]
    pub fn bars_written(&self) -> BTreeMap<&Symbol, usize> {
        self.outcomes
            .iter()
            .filter_map(|(symbol, outcome)| outcome.bars_written().map(|n| (symbol, n)))
            .collect()
    }

    /// Returns the total number of bars written.
    #[must_use]
    pub fn total_bars(&self) -> usize {
        self.outcomes
            .values()
            .filter_map(SymbolOutcome::bars_written)
            .sum()
    }

    /// Iterates over failed symbols and their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Symbol, &UpstreamFetchError)> {
        self.outcomes
            .iter()
            .filter_map(|(symbol, outcome)| outcome.error().map(|e| (symbol, e)))
    }

    /// Iterates over symbols whose fetch was truncated.
    pub fn truncated(&self) -> impl Iterator<Item = &Symbol> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_truncated())
            .map(|(symbol, _)| symbol)
    }

    /// Returns true if any symbol failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes.values().any(SymbolOutcome::is_failed)
    }

    /// Returns true if every symbol loaded untruncated with no failed writes.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcomes.values().all(|outcome| {
            outcome
                .loaded()
                .is_some_and(|load| !load.truncated && load.write_failures == 0)
        })
    }

    /// Returns the number of symbols in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if the report has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
