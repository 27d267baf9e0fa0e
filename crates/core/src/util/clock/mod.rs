// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};

pub type TimestampMillis = i64;

/// An _UTC_ timestamp with truncated millisecond precision.
#[derive(Clone, Debug, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UtcDateTimeMs {
    unix_timestamp_millis: TimestampMillis,
}

impl UtcDateTimeMs {
    #[must_use]
    pub const fn from_unix_timestamp_millis(unix_timestamp_millis: TimestampMillis) -> Self {
        Self {
            unix_timestamp_millis,
        }
    }

    #[must_use]
    pub const fn unix_timestamp_millis(&self) -> TimestampMillis {
        self.unix_timestamp_millis
    }

    #[must_use]
    pub fn from_timestamp(timestamp: &Timestamp) -> Self {
        Self::from_unix_timestamp_millis(timestamp.as_millisecond())
    }

    #[must_use]
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        Timestamp::from_millisecond(self.unix_timestamp_millis).ok()
    }

    #[must_use]
    pub fn now() -> Self {
        Self::from_unix_timestamp_millis(Timestamp::now().as_millisecond())
    }

    /// Parse a timestamp from loosely formatted text.
    ///
    /// Accepts RFC 3339 timestamps with an offset, civil date/times
    /// that are interpreted as UTC, and plain dates at midnight UTC.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Ok(timestamp) = input.parse::<Timestamp>() {
            return Some(Self::from_timestamp(&timestamp));
        }
        if let Ok(date_time) = input.parse::<DateTime>() {
            return date_time
                .to_zoned(TimeZone::UTC)
                .ok()
                .map(|zoned| Self::from_timestamp(&zoned.timestamp()));
        }
        input
            .parse::<Date>()
            .ok()
            .and_then(|date| date.to_zoned(TimeZone::UTC).ok())
            .map(|zoned| Self::from_timestamp(&zoned.timestamp()))
    }
}

impl From<Timestamp> for UtcDateTimeMs {
    fn from(from: Timestamp) -> Self {
        Self::from_timestamp(&from)
    }
}

impl fmt::Display for UtcDateTimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(timestamp) = self.to_timestamp() {
            fmt::Display::fmt(&timestamp, f)
        } else {
            write!(f, "{millis}ms", millis = self.unix_timestamp_millis)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UtcDateTimeMs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UtcDateTimeMs {
    fn deserialize<D>(deserializer: D) -> Result<UtcDateTimeMs, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Timestamp::deserialize(deserializer).map(|ts| Self::from_timestamp(&ts))
    }
}
