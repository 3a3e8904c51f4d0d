//! Loader configuration.

use serde::{Deserialize, Serialize};
use sessionbars_cache::Ttl;
use sessionbars_types::Symbol;
use std::time::Duration;

/// Backoff policy for retrying a symbol's fetch.
///
/// A retry restarts the symbol from its first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,
    /// Maximum delay between retries in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    /// Returns the delay before retry number `attempt` (zero-based) of
    /// `symbol`.
    ///
    /// Exponential backoff capped at `max_delay_ms`, with a deterministic
    /// jitter of up to +/-25% derived from the attempt and the symbol, so
    /// concurrent symbols do not retry in lockstep.
    #[must_use]
    pub fn delay(&self, attempt: u32, symbol: &Symbol) -> Duration {
        // base_delay * 2^attempt
        let exp_delay = self.base_delay_ms.saturating_mul(1u64 << attempt.min(10));
        let capped = exp_delay.min(self.max_delay_ms);

        let jitter_range = capped / 4;
        let delay = if jitter_range > 0 {
            let seed = symbol_seed(symbol).wrapping_add(u64::from(attempt) * 17);
            let offset = seed % (jitter_range * 2);
            (capped + offset).saturating_sub(jitter_range)
        } else {
            capped
        };
        Duration::from_millis(delay)
    }
}

/// FNV-1a over the symbol bytes.
fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol
        .as_str()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        })
}

/// Configuration for a [`SessionLoader`](crate::SessionLoader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Maximum number of symbols loaded concurrently.
    pub concurrency: usize,
    /// TTL of cached bars.
    pub ttl: Ttl,
    /// Retry policy for failed fetches.
    pub retry: RetryPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            ttl: Ttl::default(),
            retry: RetryPolicy::default(),
        }
    }
}
