//! CSV file bar source.
//!
//! One file per symbol and interval: `<base>/<SYMBOL>_<interval>.csv` with
//! header `timestamp,open,high,low,close,volume` (timestamp in Unix seconds).

use crate::domain::error::MacrossError;
use crate::domain::interval::Interval;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::DataPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, interval: Interval) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", symbol.to_uppercase(), interval))
    }
}

fn field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, MacrossError>
where
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| MacrossError::DataSource {
            reason: format!("missing {} column", name),
        })?
        .trim()
        .parse()
        .map_err(|e| MacrossError::DataSource {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        from: i64,
        to: i64,
    ) -> Result<Vec<Bar>, MacrossError> {
        let path = self.csv_path(symbol, interval);
        let content = fs::read_to_string(&path).map_err(|e| MacrossError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| MacrossError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let timestamp: i64 = field(&record, 0, "timestamp")?;
            if timestamp < from || timestamp > to {
                continue;
            }

            bars.push(Bar {
                timestamp,
                open: field(&record, 1, "open")?,
                high: field(&record, 2, "high")?,
                low: field(&record, 3, "low")?,
                close: field(&record, 4, "close")?,
                volume: field(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        tracing::debug!(path = %path.display(), bars = bars.len(), "loaded bars");
        Ok(bars)
    }
}
