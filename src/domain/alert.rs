//! Watched crossover alerts.
//!
//! An alert fires when the most recent bar of a fresh analysis is itself a
//! crossover bar. Delivery (chat, webhook) belongs to the caller.

use crate::domain::config_validation::{
    read_interval, read_ma_type, read_required, read_window, ALERT_SECTION_PREFIX,
};
use crate::domain::error::MacrossError;
use crate::domain::indicator::MaType;
use crate::domain::interval::Interval;
use crate::domain::pipeline::Analysis;
use crate::domain::signal::Direction;
use crate::domain::strategy::{StrategyConfig, DEFAULT_MA_FAST, DEFAULT_MA_SLOW};
use crate::ports::config_port::ConfigPort;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct AlertSpec {
    pub id: u32,
    pub symbol: String,
    pub interval: Interval,
    pub ma_fast: usize,
    pub ma_slow: usize,
    pub ma_type: MaType,
}

impl AlertSpec {
    /// Strategy for this alert: its own windows and MA type, levels and
    /// tie-break from `base`.
    pub fn strategy_config(&self, base: &StrategyConfig) -> StrategyConfig {
        StrategyConfig {
            ma_fast: self.ma_fast,
            ma_slow: self.ma_slow,
            ma_type: self.ma_type,
            ..base.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub symbol: String,
    pub interval: Interval,
    pub direction: Direction,
    pub timestamp: i64,
    pub price: f64,
    pub sl_price: f64,
    pub tp_price: f64,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {:.5} (sl {:.5}, tp {:.5}) t={}",
            self.symbol,
            self.interval,
            self.direction,
            self.price,
            self.sl_price,
            self.tp_price,
            self.timestamp
        )
    }
}

/// Every `[alert:<id>]` section, ordered by numeric id.
pub fn parse_alert_specs(config: &dyn ConfigPort) -> Result<Vec<AlertSpec>, MacrossError> {
    let mut specs = Vec::new();

    for section in config.sections() {
        let Some(raw_id) = section.strip_prefix(ALERT_SECTION_PREFIX) else {
            continue;
        };
        let id: u32 = raw_id.trim().parse().map_err(|_| MacrossError::ConfigInvalid {
            section: section.clone(),
            key: "id".to_string(),
            reason: "alert id must be a non-negative integer".to_string(),
        })?;

        specs.push(AlertSpec {
            id,
            symbol: read_required(config, &section, "symbol")?,
            interval: read_interval(config, &section, "interval")?,
            ma_fast: read_window(config, &section, "ma_fast", DEFAULT_MA_FAST)?,
            ma_slow: read_window(config, &section, "ma_slow", DEFAULT_MA_SLOW)?,
            ma_type: read_ma_type(config, &section, "ma_type")?,
        });
    }

    specs.sort_by_key(|s| s.id);
    Ok(specs)
}

/// The alert for the last bar, if that bar is a crossover.
pub fn latest_alert(analysis: &Analysis, symbol: &str, interval: Interval) -> Option<Alert> {
    let last = analysis.series.last_index()?;
    let direction = analysis.signals.get(last)?.direction()?;
    let levels = (*analysis.thresholds.get(last)?)?;
    let bar = analysis.series.get(last)?;

    Some(Alert {
        symbol: symbol.to_string(),
        interval,
        direction,
        timestamp: bar.timestamp,
        price: bar.close,
        sl_price: levels.sl_price,
        tp_price: levels.tp_price,
    })
}
