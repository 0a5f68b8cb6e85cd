//! Immutable, index-addressed bar series.
//!
//! Every pipeline stage reads bars by integer index; nothing downstream
//! mutates the series once it is built.

use crate::domain::ohlcv::Bar;

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Wraps bars that are already sorted ascending by timestamp.
    pub fn new(bars: Vec<Bar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.bars.len().checked_sub(1)
    }
}

impl From<Vec<Bar>> for BarSeries {
    fn from(bars: Vec<Bar>) -> Self {
        Self::new(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(timestamp: i64, close: f64) -> Bar {
        Bar {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    #[test]
    fn empty_series() {
        let series = BarSeries::new(vec![]);
        assert!(series.is_empty());
        assert_eq!(series.last_index(), None);
        assert!(series.get(0).is_none());
    }

    #[test]
    fn indexing() {
        let series = BarSeries::from(vec![bar(60, 1.0), bar(120, 2.0), bar(180, 3.0)]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.last_index(), Some(2));
        assert_eq!(series.get(1).map(|b| b.timestamp), Some(120));
    }
}
