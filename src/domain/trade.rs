//! Completed trade records and their aggregation from per-bar stage outputs.

use crate::domain::bar_series::BarSeries;
use crate::domain::exit::{Exit, ExitReason};
use crate::domain::signal::{Direction, Signal};
use crate::domain::threshold::Thresholds;
use crate::domain::trade_grouper::{trade_segments, TradeId};

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub trade_id: TradeId,
    pub direction: Direction,
    pub entry_index: usize,
    pub entry_price: f64,
    pub exit_index: usize,
    pub exit_price: f64,
    pub sl_price: f64,
    pub tp_price: f64,
    pub exit_reason: ExitReason,
}

impl Trade {
    /// Directional return as a fraction of entry price.
    pub fn return_fraction(&self) -> f64 {
        f64::from(self.direction.sign()) * (self.exit_price - self.entry_price) / self.entry_price
    }

    pub fn bars_held(&self) -> usize {
        self.exit_index - self.entry_index
    }

    pub fn is_win(&self) -> bool {
        self.return_fraction() > 0.0
    }
}

/// One `Trade` per non-zero `trade_id`, in ascending id order. Segments whose
/// first bar lacks a signal, thresholds or exit are dropped.
pub fn aggregate_trades(
    series: &BarSeries,
    signals: &[Signal],
    trade_ids: &[TradeId],
    thresholds: &[Option<Thresholds>],
    exits: &[Option<Exit>],
) -> Vec<Trade> {
    trade_segments(trade_ids)
        .into_iter()
        .filter_map(|seg| {
            let entry = seg.start;
            let direction = signals.get(entry)?.direction()?;
            let levels = (*thresholds.get(entry)?)?;
            let exit = (*exits.get(entry)?)?;
            let bar = series.get(entry)?;
            Some(Trade {
                trade_id: seg.trade_id,
                direction,
                entry_index: entry,
                entry_price: bar.close,
                exit_index: exit.exit_index,
                exit_price: exit.exit_price,
                sl_price: levels.sl_price,
                tp_price: levels.tp_price,
                exit_reason: exit.reason,
            })
        })
        .collect()
}
