//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seeded with the first close, then EMA[i] = EMA[i-1] + k*(C[i] - EMA[i-1]).
//! The recursion runs from bar 0, but the first (n-1) bars are reported as
//! indeterminate so EMA and SMA pairs warm up identically.

use crate::domain::indicator::{IndicatorType, MovingAverage};
use crate::domain::ohlcv::Bar;

pub fn calculate_ema(bars: &[Bar], period: usize) -> MovingAverage {
    if period == 0 || bars.is_empty() {
        return MovingAverage {
            indicator_type: IndicatorType::Ema(period),
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = bars[0].close;

    for (i, bar) in bars.iter().enumerate() {
        if i > 0 {
            ema += k * (bar.close - ema);
        }
        if i + 1 < period {
            values.push(None);
        } else {
            values.push(Some(ema));
        }
    }

    MovingAverage {
        indicator_type: IndicatorType::Ema(period),
        values,
    }
}
