//! Trade summary statistics.

use crate::domain::exit::ExitReason;
use crate::domain::signal::Direction;
use crate::domain::trade::Trade;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeSummary {
    pub total_trades: usize,
    pub long_trades: usize,
    pub short_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    pub total_return: f64,
    pub avg_return: f64,
    pub best_return: f64,
    pub worst_return: f64,
    pub avg_bars_held: f64,
    pub stop_loss_exits: usize,
    pub take_profit_exits: usize,
    pub end_of_data_exits: usize,
}

impl TradeSummary {
    pub fn compute(trades: &[Trade]) -> Self {
        let mut summary = TradeSummary::default();
        if trades.is_empty() {
            return summary;
        }

        let mut best = f64::NEG_INFINITY;
        let mut worst = f64::INFINITY;
        let mut total_bars = 0usize;

        for trade in trades {
            match trade.direction {
                Direction::Long => summary.long_trades += 1,
                Direction::Short => summary.short_trades += 1,
            }
            match trade.exit_reason {
                ExitReason::StopLoss => summary.stop_loss_exits += 1,
                ExitReason::TakeProfit => summary.take_profit_exits += 1,
                ExitReason::EndOfData => summary.end_of_data_exits += 1,
            }

            let r = trade.return_fraction();
            if trade.is_win() {
                summary.trades_won += 1;
            } else if r < 0.0 {
                summary.trades_lost += 1;
            } else {
                summary.trades_breakeven += 1;
            }
            summary.total_return += r;
            best = best.max(r);
            worst = worst.min(r);
            total_bars += trade.bars_held();
        }

        let n = trades.len();
        summary.total_trades = n;
        summary.win_rate = summary.trades_won as f64 / n as f64;
        summary.avg_return = summary.total_return / n as f64;
        summary.best_return = best;
        summary.worst_return = worst;
        summary.avg_bars_held = total_bars as f64 / n as f64;
        summary
    }
}
