//! Configuration validation.
//!
//! Turns the raw INI option bag into validated records. Unknown sections and
//! keys are rejected; values are parsed strictly rather than defaulted when
//! malformed.

use crate::domain::data_request::{parse_timestamp, DataRequest};
use crate::domain::error::MacrossError;
use crate::domain::exit::TieBreak;
use crate::domain::indicator::MaType;
use crate::domain::interval::Interval;
use crate::domain::strategy::{StrategyConfig, DEFAULT_MA_FAST, DEFAULT_MA_SLOW};
use crate::domain::threshold::{ThresholdFractions, DEFAULT_SL_FRACTION, DEFAULT_TP_FRACTION};
use crate::ports::config_port::ConfigPort;

pub const STRATEGY_SECTION: &str = "strategy";
pub const DATA_SECTION: &str = "data";
pub const REPORT_SECTION: &str = "report";
pub const ALERT_SECTION_PREFIX: &str = "alert:";

pub const STRATEGY_KEYS: &[&str] = &["ma_fast", "ma_slow", "ma_type", "sl", "tp", "tie_break"];
pub const DATA_KEYS: &[&str] = &["symbol", "interval", "lookback_minutes", "from", "to", "data_dir"];
pub const REPORT_KEYS: &[&str] = &["trades_path", "series_path"];
pub const ALERT_KEYS: &[&str] = &["symbol", "interval", "ma_fast", "ma_slow", "ma_type"];

/// Rejects any section or key outside the recognized layout.
pub fn validate_known_keys(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    for section in config.sections() {
        let allowed = match section.as_str() {
            STRATEGY_SECTION => STRATEGY_KEYS,
            DATA_SECTION => DATA_KEYS,
            REPORT_SECTION => REPORT_KEYS,
            s if s.starts_with(ALERT_SECTION_PREFIX) => ALERT_KEYS,
            _ => {
                if config.keys(&section).is_empty() {
                    continue;
                }
                return Err(MacrossError::UnknownConfigSection { section });
            }
        };
        for key in config.keys(&section) {
            if !allowed.contains(&key.as_str()) {
                return Err(MacrossError::UnknownConfigKey {
                    section: section.clone(),
                    key,
                });
            }
        }
    }
    Ok(())
}

/// Full check for a `run`: layout, `[strategy]` and `[data]`.
pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    validate_known_keys(config)?;
    strategy_config(config)?;
    data_request(config, None, None)?;
    Ok(())
}

pub fn strategy_config(config: &dyn ConfigPort) -> Result<StrategyConfig, MacrossError> {
    let section = STRATEGY_SECTION;
    Ok(StrategyConfig {
        ma_fast: read_window(config, section, "ma_fast", DEFAULT_MA_FAST)?,
        ma_slow: read_window(config, section, "ma_slow", DEFAULT_MA_SLOW)?,
        ma_type: read_ma_type(config, section, "ma_type")?,
        fractions: ThresholdFractions {
            sl_fraction: read_fraction(config, section, "sl", DEFAULT_SL_FRACTION)?,
            tp_fraction: read_fraction(config, section, "tp", DEFAULT_TP_FRACTION)?,
        },
        tie_break: read_tie_break(config, section, "tie_break")?,
    })
}

/// Builds the `[data]` request; explicit `symbol` / `interval` take precedence
/// over the file.
pub fn data_request(
    config: &dyn ConfigPort,
    symbol: Option<&str>,
    interval: Option<&str>,
) -> Result<DataRequest, MacrossError> {
    let section = DATA_SECTION;

    let symbol = match symbol {
        Some(s) => s.to_string(),
        None => read_required(config, section, "symbol")?,
    };
    let interval = match interval {
        Some(i) => i.parse::<Interval>()?,
        None => read_interval(config, section, "interval")?,
    };

    let mut request = DataRequest::new(symbol, interval);
    if let Some(minutes) = read_positive_int(config, section, "lookback_minutes")? {
        request.lookback_minutes = minutes;
    }
    request.from = read_timestamp(config, section, "from")?;
    request.to = read_timestamp(config, section, "to")?;
    Ok(request)
}

pub(crate) fn read_required(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, MacrossError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(MacrossError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn read_optional(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> MacrossError {
    MacrossError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn read_interval(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Interval, MacrossError> {
    read_required(config, section, key)?.parse()
}

pub(crate) fn read_window(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, MacrossError> {
    let Some(raw) = read_optional(config, section, key) else {
        return Ok(default);
    };
    let window: i64 = raw
        .parse()
        .map_err(|_| invalid(section, key, format!("{key} must be an integer")))?;
    if window <= 0 {
        return Err(MacrossError::InvalidWindow {
            name: key.to_string(),
            window,
        });
    }
    usize::try_from(window).map_err(|_| invalid(section, key, "window is too large"))
}

pub(crate) fn read_ma_type(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<MaType, MacrossError> {
    match read_optional(config, section, key) {
        None => Ok(MaType::default()),
        Some(raw) => MaType::from_name(&raw)
            .ok_or_else(|| invalid(section, key, "ma_type must be sma or ema")),
    }
}

fn read_fraction(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, MacrossError> {
    let Some(raw) = read_optional(config, section, key) else {
        return Ok(default);
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(invalid(section, key, format!("{key} must be a positive number"))),
    }
}

fn read_tie_break(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<TieBreak, MacrossError> {
    match read_optional(config, section, key) {
        None => Ok(TieBreak::default()),
        Some(raw) => TieBreak::from_name(&raw)
            .ok_or_else(|| invalid(section, key, "tie_break must be stop_loss or take_profit")),
    }
}

fn read_positive_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<i64>, MacrossError> {
    let Some(raw) = read_optional(config, section, key) else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(v) if v > 0 => Ok(Some(v)),
        _ => Err(invalid(section, key, format!("{key} must be a positive integer"))),
    }
}

fn read_timestamp(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<i64>, MacrossError> {
    match read_optional(config, section, key) {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw).map(Some).ok_or_else(|| {
            invalid(
                section,
                key,
                "expected Unix seconds, RFC 3339 or YYYY-MM-DD",
            )
        }),
    }
}
