//! ISO-8601 date-times with an offset, as accepted on the HTTP surface.
//!
//! RFC 3339 requires seconds; ISO-8601 lets them be omitted, so
//! `2025-06-22T10:00Z` and `2025-06-22T10:00+02:00` are accepted as well.

use chrono::{DateTime, FixedOffset, NaiveDateTime, ParseError};
use serde::{Deserialize, Deserializer};

const MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M";
const MINUTES_WITH_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

pub fn parse_offset_date_time(raw: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_rfc3339(raw).or_else(|err| {
        let zulu = raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z'));
        let fallback = match zulu {
            Some(local) => NaiveDateTime::parse_from_str(local, MINUTES_FORMAT)
                .map(|naive| naive.and_utc().fixed_offset()),
            None => DateTime::parse_from_str(raw, MINUTES_WITH_OFFSET_FORMAT),
        };
        // Report the RFC 3339 error; it describes the canonical form.
        fallback.map_err(|_| err)
    })
}

/// `deserialize_with` hook for `DateTime<FixedOffset>` fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_offset_date_time(&raw).map_err(serde::de::Error::custom)
}
