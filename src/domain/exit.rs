//! First-touch exit resolution.
//!
//! From each entry bar (inclusive) the series is scanned forward for the
//! first bar whose high/low range reaches the trade's stop or target. The
//! scan is not bounded by the trade's own segment. With no touch the trade
//! is marked at the close of the last bar.

use crate::domain::bar_series::BarSeries;
use crate::domain::ohlcv::Bar;
use crate::domain::signal::{Direction, Signal};
use crate::domain::threshold::Thresholds;
use std::fmt;

/// Which level wins when one bar touches both stop and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TieBreak {
    #[default]
    StopLoss,
    TakeProfit,
}

impl TieBreak {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "stop_loss" | "sl" => Some(TieBreak::StopLoss),
            "take_profit" | "tp" => Some(TieBreak::TakeProfit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    /// No level touched; closed at the last known price.
    EndOfData,
}

impl ExitReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ExitReason::StopLoss => "stop_loss",
            ExitReason::TakeProfit => "take_profit",
            ExitReason::EndOfData => "end_of_data",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exit {
    pub exit_index: usize,
    pub exit_price: f64,
    pub reason: ExitReason,
}

/// Which levels `bar` reaches, as (stop, target).
fn touches(bar: &Bar, direction: Direction, levels: Thresholds) -> (bool, bool) {
    match direction {
        Direction::Long => (bar.low <= levels.sl_price, bar.high >= levels.tp_price),
        Direction::Short => (bar.high >= levels.sl_price, bar.low <= levels.tp_price),
    }
}

/// Resolves the exit for one entry. `None` only if `entry_index` is out of range.
pub fn resolve_exit(
    series: &BarSeries,
    entry_index: usize,
    direction: Direction,
    levels: Thresholds,
    tie_break: TieBreak,
) -> Option<Exit> {
    let bars = series.bars();
    if entry_index >= bars.len() {
        return None;
    }

    for (offset, bar) in bars[entry_index..].iter().enumerate() {
        let reason = match (touches(bar, direction, levels), tie_break) {
            ((false, false), _) => continue,
            ((true, false), _) | ((true, true), TieBreak::StopLoss) => ExitReason::StopLoss,
            ((false, true), _) | ((true, true), TieBreak::TakeProfit) => ExitReason::TakeProfit,
        };
        return Some(Exit {
            exit_index: entry_index + offset,
            exit_price: bar.close,
            reason,
        });
    }

    let last = bars.len() - 1;
    Some(Exit {
        exit_index: last,
        exit_price: bars[last].close,
        reason: ExitReason::EndOfData,
    })
}

/// Exit per bar, populated only at entry bars (non-flat signal with thresholds).
pub fn resolve_exits(
    series: &BarSeries,
    signals: &[Signal],
    thresholds: &[Option<Thresholds>],
    tie_break: TieBreak,
) -> Vec<Option<Exit>> {
    signals
        .iter()
        .zip(thresholds)
        .enumerate()
        .map(|(i, (signal, levels))| {
            let direction = signal.direction()?;
            let levels = (*levels)?;
            resolve_exit(series, i, direction, levels, tie_break)
        })
        .collect()
}
