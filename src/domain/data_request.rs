//! Bar-source request and time-range resolution.

use crate::domain::interval::Interval;
use chrono::{DateTime, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct DataRequest {
    pub symbol: String,
    pub interval: Interval,
    pub lookback_minutes: i64,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl DataRequest {
    /// Request with the interval's default lookback and an open range.
    pub fn new(symbol: impl Into<String>, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            lookback_minutes: interval.default_lookback_minutes(),
            from: None,
            to: None,
        }
    }

    /// Resolves `(from, to)` in Unix seconds against `now`.
    ///
    /// Missing `to` is `now`; missing `from` is `to` minus the lookback.
    /// A reversed range is swapped rather than rejected.
    pub fn resolve_range(&self, now: i64) -> (i64, i64) {
        let to = self.to.unwrap_or(now);
        let from = self
            .from
            .unwrap_or_else(|| to.saturating_sub(self.lookback_minutes.saturating_mul(60)));
        if from > to { (to, from) } else { (from, to) }
    }
}

/// Accepts Unix seconds, RFC 3339, or a `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<i64>() {
        return Some(secs);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}
