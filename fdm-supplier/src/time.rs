//! CET conversions for the supplier's date and date-time fields.
//!
//! "CET" is the IANA zone: +01:00 in winter, +02:00 (CEST) in summer.

use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::CET;

#[derive(Debug, thiserror::Error)]
pub enum TimeMappingError {
    #[error("invalid local date-time {0:?}")]
    Unparseable(String),
    #[error("local date-time {0:?} does not exist in CET")]
    NonExistent(String),
}

/// Calendar date of `instant` as seen on a wall clock in CET.
pub fn as_cet_date(instant: &DateTime<FixedOffset>) -> NaiveDate {
    instant.with_timezone(&CET).date_naive()
}

/// Reads a zone-less ISO local date-time as CET wall-clock time and returns
/// the same instant expressed in UTC.
///
/// Times repeated by the autumn fall-back resolve to the earlier instant.
/// Times skipped by the spring-forward gap are pushed forward by the gap.
pub fn cet_local_to_utc(raw: &str) -> Result<DateTime<FixedOffset>, TimeMappingError> {
    let local = parse_local(raw)?;
    let zoned = match CET.from_local_datetime(&local) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => CET
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .ok_or_else(|| TimeMappingError::NonExistent(raw.to_string()))?,
    };
    Ok(zoned.with_timezone(&Utc).fixed_offset())
}

fn parse_local(raw: &str) -> Result<NaiveDateTime, TimeMappingError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map_err(|_| TimeMappingError::Unparseable(raw.to_string()))
}
