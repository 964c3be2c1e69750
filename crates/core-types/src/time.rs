//! Parsing and serialization for trade timestamps.
//!
//! Rows coming from the journal carry either a bare calendar date (`2024-03-01`)
//! or a full timestamp, with or without a UTC offset. A bare date is read as
//! midnight. Timestamps with an offset are normalized to UTC.

use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a trade timestamp in any of the accepted shapes.
pub fn parse_trade_time(raw: &str) -> Result<NaiveDateTime, CoreError> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| CoreError::InvalidTimestamp(raw.to_string()))
}

/// Formats a timestamp the way it is written back out.
pub fn format_trade_time(time: &NaiveDateTime) -> String {
    time.format(OUTPUT_FORMAT).to_string()
}

/// `serde(with = ...)` adapter for a required trade timestamp.
pub mod serde_trade_time {
    use super::{format_trade_time, parse_trade_time};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_trade_time(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_trade_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// `serde(with = ...)` adapter for an optional trade timestamp.
///
/// Empty strings are read as absent.
pub mod serde_trade_time_opt {
    use super::{format_trade_time, parse_trade_time};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_some(&format_trade_time(time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_trade_time(raw).map(Some).map_err(serde::de::Error::custom),
        }
    }
}
