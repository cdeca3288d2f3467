//! Report export port trait.

use crate::domain::analysis::ComparisonTable;
use crate::domain::chart::ChartSpec;
use crate::domain::error::StockbenchError;
use std::path::Path;

/// Port for writing the comparison table and its chart to a file.
pub trait ReportPort {
    /// Write `table` and `chart` to `output_path`, replacing any existing
    /// file.
    fn write(
        &self,
        table: &ComparisonTable,
        chart: &ChartSpec,
        output_path: &Path,
    ) -> Result<(), StockbenchError>;
}
