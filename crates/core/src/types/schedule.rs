//! Opening-hours time of day.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a string is not a valid `HH:MM` time.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time of day '{0}', expected HH:MM")]
pub struct TimeOfDayError(pub String);

/// A wall-clock time used for opening and closing hours.
///
/// Sent as `HH:MM` (what the registration form produces). Parsing also
/// accepts `HH:MM:SS`, which is how the negocios service echoes stored
/// times back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`TimeOfDayError`] when the hour or minute is out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeOfDayError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeOfDayError(format!("{hour:02}:{minute:02}")))
    }

    /// Parse `HH:MM` or `HH:MM:SS`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeOfDayError`] for anything else.
    pub fn parse(s: &str) -> Result<Self, TimeOfDayError> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(|t| Self(t.with_second(0).unwrap_or(t)))
            .map_err(|_| TimeOfDayError(s.to_owned()))
    }

    #[must_use]
    pub const fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
