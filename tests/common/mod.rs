#![allow(dead_code)]

use macross::domain::bar_series::BarSeries;
use macross::domain::error::MacrossError;
use macross::domain::interval::Interval;
use macross::domain::ohlcv::Bar;
use macross::domain::strategy::StrategyConfig;
use macross::domain::threshold::ThresholdFractions;
use macross::ports::data_port::DataPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub const START: i64 = 1_704_067_200; // 2024-01-01T00:00:00Z
pub const HOUR: i64 = 3_600;

/// In-memory bar source keyed by `SYMBOL_interval`, recording each request.
pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, Interval, i64, i64)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(symbol: &str, interval: Interval) -> String {
        format!("{}_{}", symbol, interval)
    }

    pub fn with_bars(mut self, symbol: &str, interval: Interval, bars: Vec<Bar>) -> Self {
        self.data.insert(Self::key(symbol, interval), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, interval: Interval, reason: &str) -> Self {
        self.errors
            .insert(Self::key(symbol, interval), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        from: i64,
        to: i64,
    ) -> Result<Vec<Bar>, MacrossError> {
        self.requests
            .borrow_mut()
            .push((symbol.to_string(), interval, from, to));
        let key = Self::key(symbol, interval);
        if let Some(reason) = self.errors.get(&key) {
            return Err(MacrossError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(&key)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.timestamp >= from && b.timestamp <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Hourly bar at `index` with a 0.05 band around the close.
pub fn make_bar(index: usize, close: f64) -> Bar {
    Bar {
        timestamp: START + index as i64 * HOUR,
        open: close,
        high: close + 0.05,
        low: close - 0.05,
        close,
        volume: 1_000.0,
    }
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i, c))
        .collect()
}

pub fn series_from_closes(closes: &[f64]) -> BarSeries {
    BarSeries::new(bars_from_closes(closes))
}

/// Fast MA is the close itself, slow MA the two-bar mean, so a crossover
/// happens exactly where the close turns.
pub fn turn_config() -> StrategyConfig {
    StrategyConfig {
        ma_fast: 1,
        ma_slow: 2,
        ..StrategyConfig::default()
    }
}

pub fn turn_config_with(sl_fraction: f64, tp_fraction: f64) -> StrategyConfig {
    StrategyConfig {
        fractions: ThresholdFractions {
            sl_fraction,
            tp_fraction,
        },
        ..turn_config()
    }
}

/// Ten flat bars at 100, then a steady 0.1 climb from 101 at bar 10.
pub fn single_cross_closes(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            if i < 10 {
                100.0
            } else {
                101.0 + (i - 10) as f64 * 0.1
            }
        })
        .collect()
}
