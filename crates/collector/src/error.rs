//! Error — the single caller-visible failure of the parsing pipeline.
//!
//! Lines that fail to match a pattern are a routine outcome, absorbed by
//! the state machine; they never surface as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The timestamp text captured from an event line failed to parse as a
    /// time of day. The event-line pattern tolerates an arbitrary separator
    /// before the millisecond field while the timestamp parser requires the
    /// literal dot and in-range fields, so reaching this error means the
    /// captured text itself is corrupt. Callers should treat it as fatal
    /// rather than skip the line.
    #[error("malformed timestamp in event line: {0:?}")]
    MalformedTimestamp(String),
}
