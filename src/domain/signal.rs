//! Crossover signal detection.
//!
//! A bar is a crossover when the fast line is strictly on one side of the
//! slow line now and was at-or-on the other side on the previous bar.
//! Equality on the current bar never signals; equality on the previous bar
//! counts as "not above" / "not below".

use crate::domain::indicator::IndicatorSeries;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// +1 for long, -1 for short.
    pub fn sign(self) -> i8 {
        match self {
            Direction::Long => 1,
            Direction::Short => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Per-bar crossover state. `Flat` is the "no signal" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    Long,
    Short,
    #[default]
    Flat,
}

impl Signal {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Signal::Long => Some(Direction::Long),
            Signal::Short => Some(Direction::Short),
            Signal::Flat => None,
        }
    }

    pub fn is_entry(self) -> bool {
        self != Signal::Flat
    }

    /// +1 / -1 / 0, the numeric column value.
    pub fn value(self) -> i8 {
        self.direction().map_or(0, Direction::sign)
    }
}

/// Classifies bar `i` from the line values at `i-1` and `i`.
/// Any indeterminate input yields `Flat`.
pub fn classify(
    prev_fast: Option<f64>,
    prev_slow: Option<f64>,
    fast: Option<f64>,
    slow: Option<f64>,
) -> Signal {
    let (Some(pf), Some(ps), Some(f), Some(s)) = (prev_fast, prev_slow, fast, slow) else {
        return Signal::Flat;
    };

    if f > s && pf <= ps {
        Signal::Long
    } else if f < s && pf >= ps {
        Signal::Short
    } else {
        Signal::Flat
    }
}

pub fn detect_signals(indicators: &IndicatorSeries) -> Vec<Signal> {
    let n = indicators.len();
    let mut signals = Vec::with_capacity(n);

    for i in 0..n {
        if i == 0 {
            signals.push(Signal::Flat);
            continue;
        }
        signals.push(classify(
            indicators.fast.get(i - 1),
            indicators.slow.get(i - 1),
            indicators.fast.get(i),
            indicators.slow.get(i),
        ));
    }

    signals
}
