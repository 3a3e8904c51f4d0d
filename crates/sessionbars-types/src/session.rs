//! Trading session type definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ConfigurationError;

/// Named trading window within one calendar date.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Pre-market session.
    #[serde(rename = "pre")]
    PreMarket,
    /// Regular trading hours.
    #[default]
    Regular,
    /// Post-market (after-hours) session.
    #[serde(rename = "post")]
    PostMarket,
}

impl SessionType {
    /// Returns the session type as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PreMarket => "pre",
            Self::Regular => "regular",
            Self::PostMarket => "post",
        }
    }

    /// Returns all session types in chronological order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::PreMarket, Self::Regular, Self::PostMarket]
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pre" | "premarket" | "pre-market" | "pre_market" => Ok(Self::PreMarket),
            "regular" | "rth" | "market" => Ok(Self::Regular),
            "post" | "postmarket" | "post-market" | "post_market" | "after-hours" => {
                Ok(Self::PostMarket)
            }
            _ => Err(ConfigurationError::UnknownSessionType(s.to_string())),
        }
    }
}
