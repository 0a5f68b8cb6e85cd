//! OHLCV bar representation.

use chrono::{DateTime, Utc};

/// One OHLCV observation; `timestamp` is Unix seconds at bar open.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Bar open time as a UTC datetime, `None` if the timestamp is out of range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}
