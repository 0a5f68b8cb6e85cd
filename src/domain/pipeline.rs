//! End-to-end crossover pipeline.
//!
//! indicators -> signals -> trade ids -> thresholds -> exits -> trades.
//! Each stage reads the previous stages' outputs and produces a new vector
//! aligned to bar indices; the result keeps all of them for chart overlays.
//! Appending bars means rerunning the whole pipeline on the extended series.

use crate::domain::bar_series::BarSeries;
use crate::domain::data_request::DataRequest;
use crate::domain::error::MacrossError;
use crate::domain::exit::{resolve_exits, Exit};
use crate::domain::indicator::{calculate_indicators, IndicatorSeries};
use crate::domain::ohlcv::Bar;
use crate::domain::signal::{detect_signals, Signal};
use crate::domain::strategy::StrategyConfig;
use crate::domain::threshold::{compute_thresholds, Thresholds};
use crate::domain::trade::{aggregate_trades, Trade};
use crate::domain::trade_grouper::{assign_trade_ids, TradeId};
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub series: BarSeries,
    pub config: StrategyConfig,
    pub indicators: IndicatorSeries,
    pub signals: Vec<Signal>,
    pub trade_ids: Vec<TradeId>,
    pub thresholds: Vec<Option<Thresholds>>,
    pub exits: Vec<Option<Exit>>,
    pub trades: Vec<Trade>,
}

/// One bar of the annotated series, as consumed by chart collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedBar<'a> {
    pub index: usize,
    pub bar: &'a Bar,
    pub ma_fast: Option<f64>,
    pub ma_slow: Option<f64>,
    pub signal: Signal,
    pub trade_id: TradeId,
    pub sl_price: Option<f64>,
    pub tp_price: Option<f64>,
}

impl Analysis {
    pub fn annotated_rows(&self) -> impl Iterator<Item = AnnotatedBar<'_>> + '_ {
        self.series
            .bars()
            .iter()
            .enumerate()
            .map(move |(i, bar)| AnnotatedBar {
                index: i,
                bar,
                ma_fast: self.indicators.fast.get(i),
                ma_slow: self.indicators.slow.get(i),
                signal: self.signals[i],
                trade_id: self.trade_ids[i],
                sl_price: self.thresholds[i].map(|t| t.sl_price),
                tp_price: self.thresholds[i].map(|t| t.tp_price),
            })
    }

    pub fn signal_count(&self) -> usize {
        self.signals.iter().filter(|s| s.is_entry()).count()
    }
}

pub fn run(series: BarSeries, config: &StrategyConfig) -> Result<Analysis, MacrossError> {
    let indicators = calculate_indicators(&series, config.ma_fast, config.ma_slow, config.ma_type)?;
    let signals = detect_signals(&indicators);
    let trade_ids = assign_trade_ids(&signals);
    let thresholds = compute_thresholds(&series, &signals, &trade_ids, config.fractions);
    let exits = resolve_exits(&series, &signals, &thresholds, config.tie_break);
    let trades = aggregate_trades(&series, &signals, &trade_ids, &thresholds, &exits);

    tracing::debug!(
        bars = series.len(),
        signals = signals.iter().filter(|s| s.is_entry()).count(),
        trades = trades.len(),
        strategy = %config.label(),
        "pipeline complete"
    );

    Ok(Analysis {
        series,
        config: config.clone(),
        indicators,
        signals,
        trade_ids,
        thresholds,
        exits,
        trades,
    })
}

/// Resolves the request range, fetches once, and runs the pipeline.
pub fn fetch_and_run(
    data_port: &dyn DataPort,
    request: &DataRequest,
    config: &StrategyConfig,
    now: i64,
) -> Result<Analysis, MacrossError> {
    let (from, to) = request.resolve_range(now);
    tracing::info!(
        symbol = %request.symbol,
        interval = %request.interval,
        from,
        to,
        "fetching bars"
    );

    let bars = data_port.fetch_bars(&request.symbol, request.interval, from, to)?;
    if bars.is_empty() {
        return Err(MacrossError::NoData {
            symbol: request.symbol.clone(),
            interval: request.interval.to_string(),
            from,
            to,
        });
    }

    run(BarSeries::new(bars), config)
}
