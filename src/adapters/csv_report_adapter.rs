//! CSV report writer for the trade table and the annotated series.

use crate::domain::error::MacrossError;
use crate::domain::pipeline::Analysis;
use crate::ports::report_port::ReportPort;
use std::path::Path;

pub const TRADE_HEADER: [&str; 12] = [
    "trade_id",
    "direction",
    "entry_index",
    "entry_time",
    "entry_price",
    "exit_index",
    "exit_time",
    "exit_price",
    "sl_price",
    "tp_price",
    "exit_reason",
    "return_pct",
];

pub const SERIES_HEADER: [&str; 12] = [
    "timestamp",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "ma_fast",
    "ma_slow",
    "signal",
    "trade_id",
    "sl_price",
    "tp_price",
];

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn csv_err(path: &Path, e: csv::Error) -> MacrossError {
    MacrossError::Report {
        reason: format!("failed to write {}: {}", path.display(), e),
    }
}

fn flush_err(path: &Path, e: std::io::Error) -> MacrossError {
    MacrossError::Report {
        reason: format!("failed to write {}: {}", path.display(), e),
    }
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn bar_time(analysis: &Analysis, index: usize) -> String {
    analysis
        .series
        .get(index)
        .map(|bar| {
            bar.datetime()
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| bar.timestamp.to_string())
        })
        .unwrap_or_default()
}

impl ReportPort for CsvReportAdapter {
    fn write_trades(&self, analysis: &Analysis, output_path: &Path) -> Result<(), MacrossError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| csv_err(output_path, e))?;
        wtr.write_record(TRADE_HEADER)
            .map_err(|e| csv_err(output_path, e))?;

        for t in &analysis.trades {
            wtr.write_record([
                t.trade_id.to_string(),
                t.direction.to_string(),
                t.entry_index.to_string(),
                bar_time(analysis, t.entry_index),
                t.entry_price.to_string(),
                t.exit_index.to_string(),
                bar_time(analysis, t.exit_index),
                t.exit_price.to_string(),
                t.sl_price.to_string(),
                t.tp_price.to_string(),
                t.exit_reason.to_string(),
                format!("{:.4}", t.return_fraction() * 100.0),
            ])
            .map_err(|e| csv_err(output_path, e))?;
        }

        wtr.flush().map_err(|e| flush_err(output_path, e))?;
        tracing::info!(path = %output_path.display(), trades = analysis.trades.len(), "wrote trades");
        Ok(())
    }

    fn write_series(&self, analysis: &Analysis, output_path: &Path) -> Result<(), MacrossError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| csv_err(output_path, e))?;
        wtr.write_record(SERIES_HEADER)
            .map_err(|e| csv_err(output_path, e))?;

        for row in analysis.annotated_rows() {
            wtr.write_record([
                row.bar.timestamp.to_string(),
                row.bar.open.to_string(),
                row.bar.high.to_string(),
                row.bar.low.to_string(),
                row.bar.close.to_string(),
                row.bar.volume.to_string(),
                opt(row.ma_fast),
                opt(row.ma_slow),
                row.signal.value().to_string(),
                row.trade_id.to_string(),
                opt(row.sl_price),
                opt(row.tp_price),
            ])
            .map_err(|e| csv_err(output_path, e))?;
        }

        wtr.flush().map_err(|e| flush_err(output_path, e))?;
        tracing::info!(path = %output_path.display(), rows = analysis.series.len(), "wrote series");
        Ok(())
    }
}
