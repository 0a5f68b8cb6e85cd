//! Validated moving-average crossover strategy configuration.

use crate::domain::exit::TieBreak;
use crate::domain::indicator::{IndicatorType, MaType};
use crate::domain::threshold::ThresholdFractions;

pub const DEFAULT_MA_FAST: usize = 21;
pub const DEFAULT_MA_SLOW: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub ma_fast: usize,
    pub ma_slow: usize,
    pub ma_type: MaType,
    pub fractions: ThresholdFractions,
    pub tie_break: TieBreak,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            ma_fast: DEFAULT_MA_FAST,
            ma_slow: DEFAULT_MA_SLOW,
            ma_type: MaType::Sma,
            fractions: ThresholdFractions::default(),
            tie_break: TieBreak::StopLoss,
        }
    }
}

impl StrategyConfig {
    pub fn fast_indicator(&self) -> IndicatorType {
        IndicatorType::new(self.ma_type, self.ma_fast)
    }

    pub fn slow_indicator(&self) -> IndicatorType {
        IndicatorType::new(self.ma_type, self.ma_slow)
    }

    /// Short label such as `SMA(21)/SMA(50)`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.fast_indicator(), self.slow_indicator())
    }
}
