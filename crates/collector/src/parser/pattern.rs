//! Line classification against the two recognized line shapes.
//!
//! Pure helpers over patterns compiled once at first use and read-only
//! afterwards. Absence of a match is a routine outcome the state machine
//! branches on — classification never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use super::TRACE_START_PREFIX;

/// Event line: `HH:MM:SS.mmm [SEVERITY] logger.name free text message`.
/// The character before the millisecond field is deliberately unanchored
/// (any single character); the timestamp parser enforces the literal dot
/// downstream.
static EVENT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<timestamp>\d\d:\d\d:\d\d.\d\d\d) \[(?P<severity>[^ ]*)\] (?P<logger>[^ ]*) (?P<message>.*)$",
    )
    .expect("event-line pattern is valid")
});

/// Stack-trace terminator: an identifier-like exception type name,
/// optionally followed by `: detail`, anchored to the whole line.
static TRACE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<exception>[a-zA-Z]\w*)(:.*)?$").expect("trace-end pattern is valid")
});

/// Fields extracted from an event line. Borrows from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFields<'a> {
    pub timestamp: &'a str,
    pub severity: &'a str,
    pub logger: &'a str,
    pub message: &'a str,
}

/// Match a raw line against the event-line shape.
pub fn match_event_line(line: &str) -> Option<EventFields<'_>> {
    let caps = EVENT_LINE.captures(line)?;
    Some(EventFields {
        timestamp: caps.name("timestamp")?.as_str(),
        severity: caps.name("severity")?.as_str(),
        logger: caps.name("logger")?.as_str(),
        message: caps.name("message")?.as_str(),
    })
}

/// Match a raw line against the stack-trace terminator shape, returning
/// the exception type name.
pub fn match_trace_end(line: &str) -> Option<&str> {
    TRACE_END
        .captures(line)
        .and_then(|caps| caps.name("exception"))
        .map(|m| m.as_str())
}

/// True if the line opens a stack-trace body.
pub fn is_trace_start(line: &str) -> bool {
    line.starts_with(TRACE_START_PREFIX)
}
