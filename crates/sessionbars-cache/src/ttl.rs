//! Cache entry time-to-live.

use sessionbars_types::ConfigurationError;
use std::time::Duration;

/// Time-to-live of a cached bar.
///
/// Consumers query a session for hours after it is loaded, so the TTL is
/// never allowed below [`Ttl::MIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ttl(Duration);

impl Ttl {
    /// Shortest accepted TTL (one hour).
    pub const MIN: Self = Self(Duration::from_secs(60 * 60));

    /// Default TTL (24 hours).
    pub const DEFAULT: Self = Self(Duration::from_secs(24 * 60 * 60));

    /// Creates a TTL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::TtlTooShort`] if `duration` is below
    /// [`Ttl::MIN`].
    pub const fn new(duration: Duration) -> Result<Self, ConfigurationError> {
        if duration.as_secs() < Self::MIN.0.as_secs() {
            return Err(ConfigurationError::TtlTooShort {
                actual_secs: duration.as_secs(),
                minimum_secs: Self::MIN.0.as_secs(),
            });
        }
        Ok(Self(duration))
    }

    /// Creates a TTL from whole hours.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::TtlTooShort`] if `hours` is zero.
    pub const fn from_hours(hours: u64) -> Result<Self, ConfigurationError> {
        Self::new(Duration::from_secs(hours.saturating_mul(60 * 60)))
    }

    /// Returns the TTL as a duration.
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        self.0
    }

    /// Returns the TTL in whole seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Ttl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.as_secs();
        if secs % 3600 == 0 {
            write!(f, "{}h", secs / 3600)
        } else {
            write!(f, "{secs}s")
        }
    }
}
