//! Metric point output records.
//!
//! One `MetricPoint` represents a single logical log event — a plain
//! timestamped line, or a whole stack-trace block collapsed into its
//! originating ERROR line — as a counter increment for downstream
//! metric transport.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Prefix of every emitted metric name: `logs.<logger>.<severity>`.
pub const METRIC_PREFIX: &str = "logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Counter,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
        }
    }
}

/// Attribute block attached to every point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricAttributes {
    pub metric_type: MetricType,
    /// Present only for events extracted from a terminated stack trace,
    /// and then exactly `["exception:<TypeName>"]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// One emitted measurement record (counter value 1) with name, timestamp,
/// message, and optional tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricPoint {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub value: u64,
    pub message: String,
    pub attributes: MetricAttributes,
}

impl MetricPoint {
    /// Counter point with value 1 and no tags.
    pub fn counter(name: String, timestamp: DateTime<Utc>, message: String) -> Self {
        Self {
            name,
            timestamp,
            value: 1,
            message,
            attributes: MetricAttributes {
                metric_type: MetricType::Counter,
                tags: None,
            },
        }
    }

    /// Tag the point with the exception type that terminated its stack trace.
    pub fn with_exception_tag(mut self, exception: &str) -> Self {
        self.attributes.tags = Some(vec![format!("exception:{}", exception)]);
        self
    }

    /// Decompose into the `(name, timestamp, value, message, attributes)`
    /// tuple consumed by the transport layer.
    pub fn into_parts(self) -> (String, DateTime<Utc>, u64, String, MetricAttributes) {
        (
            self.name,
            self.timestamp,
            self.value,
            self.message,
            self.attributes,
        )
    }
}

/// Metric name for a logger/severity pair: `logs.<logger>.<severity-lowercased>`.
pub fn metric_name(logger: &str, severity: &str) -> String {
    format!("{}.{}.{}", METRIC_PREFIX, logger, severity.to_lowercase())
}
