//! Moving-average indicators over bar closes.
//!
//! - `MaType`: which smoothing the crossover pair uses
//! - `IndicatorType`: indicator identity + window, used for labelling columns
//! - `MovingAverage`: one line, `None` while the window is still warming up
//! - `IndicatorSeries`: the fast/slow pair aligned to bar indices

pub mod ema;
pub mod sma;

use crate::domain::bar_series::BarSeries;
use crate::domain::error::MacrossError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaType {
    #[default]
    Sma,
    Ema,
}

impl MaType {
    /// Case-insensitive `sma` / `ema`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "sma" => Some(MaType::Sma),
            "ema" => Some(MaType::Ema),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MaType::Sma => "sma",
            MaType::Ema => "ema",
        }
    }
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
}

impl IndicatorType {
    pub fn new(ma_type: MaType, window: usize) -> Self {
        match ma_type {
            MaType::Sma => IndicatorType::Sma(window),
            MaType::Ema => IndicatorType::Ema(window),
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl MovingAverage {
    /// Value at `index`; `None` during warm-up or past the end.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub fast: MovingAverage,
    pub slow: MovingAverage,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.fast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fast.is_empty()
    }
}

/// Computes the fast/slow pair. Both lines are indeterminate for
/// `i < window - 1` regardless of `ma_type`.
pub fn calculate_indicators(
    series: &BarSeries,
    window_fast: usize,
    window_slow: usize,
    ma_type: MaType,
) -> Result<IndicatorSeries, MacrossError> {
    check_window("ma_fast", window_fast)?;
    check_window("ma_slow", window_slow)?;

    Ok(IndicatorSeries {
        fast: calculate_ma(series, window_fast, ma_type),
        slow: calculate_ma(series, window_slow, ma_type),
    })
}

fn calculate_ma(series: &BarSeries, window: usize, ma_type: MaType) -> MovingAverage {
    match ma_type {
        MaType::Sma => sma::calculate_sma(series.bars(), window),
        MaType::Ema => ema::calculate_ema(series.bars(), window),
    }
}

fn check_window(name: &str, window: usize) -> Result<(), MacrossError> {
    if window == 0 {
        return Err(MacrossError::InvalidWindow {
            name: name.to_string(),
            window: 0,
        });
    }
    Ok(())
}
