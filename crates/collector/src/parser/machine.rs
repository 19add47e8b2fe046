//! The stateful parsing core: consumes one line at a time, emits at most
//! one metric point per call.
//!
//! Possible state transitions:
//!
//! `LookingForStart` → `LookingForStart`:
//!   * line doesn't match the event shape (ignored)
//!   * line matches with a non-ERROR severity (emits a point)
//!
//! `LookingForStart` → `FindStackTraceStart`:
//!   * line matches with ERROR severity (fields held as the pending event)
//!
//! `FindStackTraceStart` → `FindStackTraceEnd`:
//!   * line starts with `Traceback` (pending event retained)
//!
//! `FindStackTraceStart` / `FindStackTraceEnd` → `LookingForStart` or
//! `FindStackTraceStart`:
//!   * a new timestamped line resynchronizes the machine — the pending
//!     event is dropped without emission and the line is handled as if
//!     seen from the initial state; any other non-matching line keeps the
//!     search going
//!
//! `FindStackTraceEnd` → `LookingForStart`:
//!   * line matches the trace terminator (emits the point built from the
//!     pending event, tagged with the exception type)
//!
//! An unterminated trace is never flushed: if the input ends while a
//! pending event is held, that event is silently dropped.

use crate::error::ParseError;
use crate::metrics::ParserMetrics;
use crate::point::{metric_name, MetricPoint};

use super::pattern::{self, EventFields};
use super::timestamp;
use super::ERROR_SEVERITY;

/// Control state of the parser. Exactly one variant is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Initial state: scanning for the next timestamped event line.
    LookingForStart,
    /// An ERROR event is held; scanning for its `Traceback` marker.
    FindStackTraceStart,
    /// Inside a stack-trace body; scanning for the terminating exception line.
    FindStackTraceEnd,
}

/// Fields of an ERROR event held while its stack trace is being located.
/// The timestamp stays unparsed until emission.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEvent {
    timestamp: String,
    severity: String,
    logger: String,
    message: String,
}

impl PendingEvent {
    fn capture(fields: &EventFields<'_>) -> Self {
        Self {
            timestamp: fields.timestamp.to_string(),
            severity: fields.severity.to_string(),
            logger: fields.logger.to_string(),
            message: fields.message.to_string(),
        }
    }
}

/// Multiline-aware log parser.
///
/// Feed lines strictly in source order, one `parse_line` call per line;
/// each call returns at most one metric point. The machine never buffers
/// lines, so ordering is entirely the caller's responsibility. One
/// instance per log stream — concurrent streams each get their own.
#[derive(Debug)]
pub struct MultilineParser {
    state: ParserState,
    pending: Option<PendingEvent>,
    metrics: ParserMetrics,
}

impl MultilineParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::LookingForStart,
            pending: None,
            metrics: ParserMetrics::new(),
        }
    }

    /// Entry point: consume one line (without its terminator), returning
    /// the metric point it completes, if any.
    ///
    /// The only error is [`ParseError::MalformedTimestamp`], raised when a
    /// captured timestamp fails to parse on an emission path; unrecognized
    /// lines are absorbed silently.
    pub fn parse_line(&mut self, line: &str) -> Result<Option<MetricPoint>, ParseError> {
        debug_assert_eq!(
            self.pending.is_some(),
            !matches!(self.state, ParserState::LookingForStart),
            "pending event must be held exactly in the trace-search states"
        );

        self.metrics.record_line();
        let point = match self.state {
            ParserState::LookingForStart => self.evaluate_start(line)?,
            ParserState::FindStackTraceStart => self.find_stack_trace_start(line)?,
            ParserState::FindStackTraceEnd => self.find_stack_trace_end(line)?,
        };
        if point.is_some() {
            self.metrics.record_point();
        }
        Ok(point)
    }

    /// Current control state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// True while an ERROR event is held for a stack-trace search.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Counters recorded by this parser instance.
    pub fn metrics(&self) -> &ParserMetrics {
        &self.metrics
    }

    /// Evaluate a line the way the initial state does.
    ///
    /// Also called directly from both trace-search states (a delegation,
    /// not a transition) so a single line doubles as a resynchronization
    /// point: a new ERROR line supersedes the pending event, any other
    /// timestamped line drops it and emits its own point.
    fn evaluate_start(&mut self, line: &str) -> Result<Option<MetricPoint>, ParseError> {
        let Some(event) = pattern::match_event_line(line) else {
            // Not an event line. From the initial state this is noise;
            // from a trace-search state the search simply continues.
            return Ok(None);
        };

        if event.severity == ERROR_SEVERITY {
            if let Some(dropped) = self.pending.replace(PendingEvent::capture(&event)) {
                tracing::debug!(
                    logger = %dropped.logger,
                    "parser: pending event superseded before its trace completed"
                );
                self.metrics.record_pending_discarded();
            }
            self.state = ParserState::FindStackTraceStart;
            tracing::trace!(
                logger = %event.logger,
                "parser: error event held, searching for stack trace"
            );
            return Ok(None);
        }

        // Any non-ERROR event line abandons an in-flight trace search.
        if let Some(dropped) = self.pending.take() {
            tracing::debug!(
                logger = %dropped.logger,
                "parser: pending event dropped on resynchronization"
            );
            self.metrics.record_pending_discarded();
        }
        self.state = ParserState::LookingForStart;

        let instant = timestamp::resolve(event.timestamp)?;
        Ok(Some(MetricPoint::counter(
            metric_name(event.logger, event.severity),
            instant,
            event.message.to_string(),
        )))
    }

    fn find_stack_trace_start(&mut self, line: &str) -> Result<Option<MetricPoint>, ParseError> {
        if pattern::is_trace_start(line) {
            self.state = ParserState::FindStackTraceEnd;
            return Ok(None);
        }
        self.evaluate_start(line)
    }

    fn find_stack_trace_end(&mut self, line: &str) -> Result<Option<MetricPoint>, ParseError> {
        let Some(exception) = pattern::match_trace_end(line) else {
            return self.evaluate_start(line);
        };

        self.state = ParserState::LookingForStart;
        let Some(pending) = self.pending.take() else {
            // State and pending move together; this branch is unreachable
            // through parse_line.
            debug_assert!(false, "trace terminator with no pending event");
            return Ok(None);
        };

        let instant = timestamp::resolve(&pending.timestamp)?;
        self.metrics.record_trace_collapsed();
        tracing::debug!(
            logger = %pending.logger,
            exception,
            "parser: stack trace collapsed into tagged point"
        );
        Ok(Some(
            MetricPoint::counter(
                metric_name(&pending.logger, &pending.severity),
                instant,
                pending.message,
            )
            .with_exception_tag(exception),
        ))
    }
}

impl Default for MultilineParser {
    fn default() -> Self {
        Self::new()
    }
}
