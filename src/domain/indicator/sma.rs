//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = (C[i-n+1] + ... + C[i]) / n, summed per window.
//! A window of identical closes yields that close exactly.
//! Warmup: first (n-1) bars are indeterminate.

use crate::domain::indicator::{IndicatorType, MovingAverage};
use crate::domain::ohlcv::Bar;

pub fn calculate_sma(bars: &[Bar], period: usize) -> MovingAverage {
    if period == 0 || bars.is_empty() {
        return MovingAverage {
            indicator_type: IndicatorType::Sma(period),
            values: Vec::new(),
        };
    }

    let warmup = (period - 1).min(bars.len());
    let mut values = vec![None; warmup];
    values.extend(bars.windows(period).map(|window| Some(window_mean(window))));

    MovingAverage {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}

fn window_mean(window: &[Bar]) -> f64 {
    let first = window[0].close;
    if window.iter().all(|b| b.close == first) {
        return first;
    }
    window.iter().map(|b| b.close).sum::<f64>() / window.len() as f64
}
