//! Report output port trait.

use crate::domain::error::MacrossError;
use crate::domain::pipeline::Analysis;
use std::path::Path;

/// Port for writing the trade table and the annotated bar series.
pub trait ReportPort {
    fn write_trades(&self, analysis: &Analysis, output_path: &Path) -> Result<(), MacrossError>;

    fn write_series(&self, analysis: &Analysis, output_path: &Path) -> Result<(), MacrossError>;
}
