//! Counters for the parsing pipeline.
//!
//! All operations use `Ordering::Relaxed` — for observability counters,
//! eventual correctness is sufficient. Snapshot reads are not atomic across
//! fields; slight tearing between counters is acceptable and avoids
//! synchronization on the per-line hot path.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct ParserMetrics {
    /// Lines fed through `parse_line`.
    pub lines_consumed: AtomicU64,
    /// Metric points returned to the caller.
    pub points_emitted: AtomicU64,
    /// Stack-trace blocks collapsed into a single tagged point.
    pub traces_collapsed: AtomicU64,
    /// Pending ERROR events discarded on resynchronization.
    pub pending_discarded: AtomicU64,
}

impl ParserMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_line(&self) {
        self.lines_consumed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_point(&self) {
        self.points_emitted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_trace_collapsed(&self) {
        self.traces_collapsed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_pending_discarded(&self) {
        self.pending_discarded.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_consumed: self.lines_consumed.load(Ordering::Relaxed),
            points_emitted: self.points_emitted.load(Ordering::Relaxed),
            traces_collapsed: self.traces_collapsed.load(Ordering::Relaxed),
            pending_discarded: self.pending_discarded.load(Ordering::Relaxed),
        }
    }
}

/// Serializable snapshot of [`ParserMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub lines_consumed: u64,
    pub points_emitted: u64,
    pub traces_collapsed: u64,
    pub pending_discarded: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let snapshot = ParserMetrics::new().snapshot();
        assert_eq!(snapshot.lines_consumed, 0);
        assert_eq!(snapshot.points_emitted, 0);
        assert_eq!(snapshot.traces_collapsed, 0);
        assert_eq!(snapshot.pending_discarded, 0);
    }

    #[test]
    fn test_record_and_snapshot() {
        let metrics = ParserMetrics::new();
        metrics.record_line();
        metrics.record_line();
        metrics.record_point();
        metrics.record_trace_collapsed();
        metrics.record_pending_discarded();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.lines_consumed, 2);
        assert_eq!(snapshot.points_emitted, 1);
        assert_eq!(snapshot.traces_collapsed, 1);
        assert_eq!(snapshot.pending_discarded, 1);
    }
}
