//! Bar source port trait.

use crate::domain::error::MacrossError;
use crate::domain::interval::Interval;
use crate::domain::ohlcv::Bar;

pub trait DataPort {
    /// Bars for `symbol` at `interval` with `from <= timestamp <= to`
    /// (Unix seconds), sorted ascending. An empty vec is not an error here.
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        from: i64,
        to: i64,
    ) -> Result<Vec<Bar>, MacrossError>;
}
