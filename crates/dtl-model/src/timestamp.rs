//! Timestamps as the backend sends them.
//!
//! User statistics arrive either as Unix seconds (a number or a numeric
//! string) or as RFC 3339 strings, depending on the endpoint.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A point in time reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap a UTC instant
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Build from Unix seconds
    pub fn from_unix_seconds(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(Self)
    }

    /// Parse either Unix seconds or an RFC 3339 string
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(seconds) = raw.parse::<i64>() {
            return Self::from_unix_seconds(seconds);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|at| Self(at.with_timezone(&Utc)))
    }

    /// The underlying UTC instant
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Long US-English rendering, e.g. `March 4, 2024, 09:05 AM`
    pub fn format_long(&self) -> String {
        self.0.format("%B %-d, %Y, %I:%M %p").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_long())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(i64),
    Fractional(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Seconds(seconds) => Self::from_unix_seconds(seconds),
            RawTimestamp::Fractional(seconds) => Self::from_unix_seconds(seconds.trunc() as i64),
            RawTimestamp::Text(raw) => Self::parse(&raw),
        };

        parsed.ok_or_else(|| de::Error::custom("expected Unix seconds or an RFC 3339 timestamp"))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}
