//! Time-of-day parsing for event-line timestamps.
//!
//! Event lines carry a bare `HH:MM:SS.mmm` clock reading; metric points
//! need an absolute instant. The reading is combined with the calendar
//! date the parser runs on — the logs themselves carry no date.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::ParseError;

/// Strict `HH:MM:SS.mmm` time-of-day format (literal dot, exactly three
/// fractional digits).
const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S%.3f";

/// Parse a strict `HH:MM:SS.mmm` time-of-day reading.
///
/// The event-line pattern tolerates an arbitrary separator before the
/// millisecond field; this parser does not. Out-of-range fields, a
/// non-dot separator, or a wrong fraction width all surface as
/// [`ParseError::MalformedTimestamp`].
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, ParseError> {
    // chrono treats the `%.3f` fraction as optional when parsing; this
    // format does not. Pin the exact shape before handing over.
    if raw.len() != 12 || raw.as_bytes()[8] != b'.' {
        return Err(ParseError::MalformedTimestamp(raw.to_string()));
    }
    NaiveTime::parse_from_str(raw, TIME_OF_DAY_FORMAT)
        .map_err(|_| ParseError::MalformedTimestamp(raw.to_string()))
}

/// Combine a time-of-day reading with an explicit calendar date.
pub fn anchor_to_date(raw: &str, date: NaiveDate) -> Result<DateTime<Utc>, ParseError> {
    let time = parse_time_of_day(raw)?;
    Ok(date.and_time(time).and_utc())
}

/// Combine a time-of-day reading with the current calendar date.
pub fn resolve(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    anchor_to_date(raw, Utc::now().date_naive())
}
