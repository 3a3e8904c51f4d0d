//! Exchange-local minute labels.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ConfigurationError;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A minute of the exchange-local civil day, rendered as `HH:MM`.
///
/// Labels order chronologically within one local day. A label carries no
/// timezone; it is only meaningful together with the exchange calendar
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MinuteLabel {
    minute_of_day: u16,
}

impl MinuteLabel {
    /// Creates a label from an hour and minute.
    ///
    /// Returns `None` if `hour >= 24` or `minute >= 60`.
    #[must_use]
    pub const fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self {
            minute_of_day: (hour * 60 + minute) as u16,
        })
    }

    /// Creates a label from a minute offset within the day.
    ///
    /// Returns `None` if `minute_of_day >= 1440`.
    #[must_use]
    pub const fn from_minute_of_day(minute_of_day: u16) -> Option<Self> {
        if minute_of_day >= MINUTES_PER_DAY {
            return None;
        }
        Some(Self { minute_of_day })
    }

    /// Truncates a local wall-clock time to its minute label.
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            minute_of_day: (time.hour() * 60 + time.minute()) as u16,
        }
    }

    /// Returns the minute offset within the local day.
    #[must_use]
    pub const fn minute_of_day(&self) -> u16 {
        self.minute_of_day
    }

    /// Returns the hour component.
    #[must_use]
    pub const fn hour(&self) -> u32 {
        (self.minute_of_day / 60) as u32
    }

    /// Returns the minute component.
    #[must_use]
    pub const fn minute(&self) -> u32 {
        (self.minute_of_day % 60) as u32
    }

    /// Returns the local wall-clock time at the start of this minute.
    #[must_use]
    pub fn to_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }

    /// Returns the following label, or `None` at `23:59`.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        Self::from_minute_of_day(self.minute_of_day + 1)
    }
}

impl std::fmt::Display for MinuteLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for MinuteLabel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidLabel(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for MinuteLabel {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MinuteLabel> for String {
    fn from(label: MinuteLabel) -> Self {
        label.to_string()
    }
}
