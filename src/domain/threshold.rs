//! Per-trade stop-loss / take-profit levels.
//!
//! Levels are priced off the signal bar's close and forward-filled across
//! every bar of the same `trade_id`. Bars with `trade_id` 0 carry none.

use crate::domain::bar_series::BarSeries;
use crate::domain::signal::{Direction, Signal};
use crate::domain::trade_grouper::TradeId;

pub const DEFAULT_SL_FRACTION: f64 = 0.003;
pub const DEFAULT_TP_FRACTION: f64 = 0.006;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdFractions {
    pub sl_fraction: f64,
    pub tp_fraction: f64,
}

impl Default for ThresholdFractions {
    fn default() -> Self {
        Self {
            sl_fraction: DEFAULT_SL_FRACTION,
            tp_fraction: DEFAULT_TP_FRACTION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub sl_price: f64,
    pub tp_price: f64,
}

impl Thresholds {
    pub fn at_entry(direction: Direction, entry_close: f64, fractions: ThresholdFractions) -> Self {
        let ThresholdFractions {
            sl_fraction,
            tp_fraction,
        } = fractions;
        match direction {
            Direction::Long => Self {
                sl_price: entry_close * (1.0 - sl_fraction),
                tp_price: entry_close * (1.0 + tp_fraction),
            },
            Direction::Short => Self {
                sl_price: entry_close * (1.0 + sl_fraction),
                tp_price: entry_close * (1.0 - tp_fraction),
            },
        }
    }
}

pub fn compute_thresholds(
    series: &BarSeries,
    signals: &[Signal],
    trade_ids: &[TradeId],
    fractions: ThresholdFractions,
) -> Vec<Option<Thresholds>> {
    let mut current: Option<(TradeId, Thresholds)> = None;

    series
        .bars()
        .iter()
        .zip(signals.iter().zip(trade_ids))
        .map(|(bar, (signal, &trade_id))| {
            if let Some(direction) = signal.direction() {
                let levels = Thresholds::at_entry(direction, bar.close, fractions);
                current = Some((trade_id, levels));
                return Some(levels);
            }
            match current {
                Some((id, levels)) if id == trade_id && trade_id != 0 => Some(levels),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::Bar;
    use crate::domain::trade_grouper::assign_trade_ids;
    use approx::assert_relative_eq;

    fn series(closes: &[f64]) -> BarSeries {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: i as i64,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn long_levels() {
        let t = Thresholds::at_entry(Direction::Long, 100.0, ThresholdFractions::default());
        assert_relative_eq!(t.sl_price, 99.7, epsilon = 1e-9);
        assert_relative_eq!(t.tp_price, 100.6, epsilon = 1e-9);
    }

    #[test]
    fn short_levels() {
        let t = Thresholds::at_entry(Direction::Short, 100.0, ThresholdFractions::default());
        assert_relative_eq!(t.sl_price, 100.3, epsilon = 1e-9);
        assert_relative_eq!(t.tp_price, 99.4, epsilon = 1e-9);
    }

    #[test]
    fn forward_fills_within_trade_and_resets_at_next_signal() {
        let s = series(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let signals = [
            Signal::Flat,
            Signal::Long,
            Signal::Flat,
            Signal::Short,
            Signal::Flat,
        ];
        let ids = assign_trade_ids(&signals);
        let fractions = ThresholdFractions {
            sl_fraction: 0.1,
            tp_fraction: 0.2,
        };
        let t = compute_thresholds(&s, &signals, &ids, fractions);

        assert!(t[0].is_none());
        assert_eq!(t[1], t[2]);
        assert_relative_eq!(t[1].unwrap().sl_price, 11.0 * 0.9, epsilon = 1e-9);
        assert_relative_eq!(t[1].unwrap().tp_price, 11.0 * 1.2, epsilon = 1e-9);
        assert_eq!(t[3], t[4]);
        assert_relative_eq!(t[3].unwrap().sl_price, 13.0 * 1.1, epsilon = 1e-9);
        assert_relative_eq!(t[3].unwrap().tp_price, 13.0 * 0.8, epsilon = 1e-9);
    }

    #[test]
    fn no_signals_no_thresholds() {
        let s = series(&[10.0, 10.0, 10.0]);
        let signals = [Signal::Flat; 3];
        let ids = assign_trade_ids(&signals);
        let t = compute_thresholds(&s, &signals, &ids, ThresholdFractions::default());
        assert_eq!(t, vec![None; 3]);
    }
}
