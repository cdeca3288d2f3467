//! Layout of the growth comparison chart.
//!
//! The chart references sheet cells by absolute (row, column) position, so
//! the layout is derived from the table shape and kept independent of any
//! spreadsheet library.

use crate::domain::analysis::{
    BENCHMARK_GROWTH_COLUMN, ComparisonTable, STOCK_GROWTH_COLUMN,
};
use crate::domain::returns::GROWTH_NOTIONAL;
use crate::domain::metrics::format_thousands;

pub const DATA_SHEET: &str = "Data";
pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 400;
/// Top-left anchor cell of the chart: `I2`.
pub const CHART_ANCHOR: (u32, u16) = (1, 8);

/// `(first_row, first_col, last_row, last_col)` on [`DATA_SHEET`].
pub type CellRange = (u32, u16, u32, u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    Green,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDash {
    Solid,
    Dash,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: LineColor,
    pub dash: LineDash,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeriesSpec {
    /// Header cell holding the series name.
    pub name_cell: (u32, u16),
    pub categories: CellRange,
    pub values: CellRange,
    pub line: LineStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub width: u32,
    pub height: u32,
    pub anchor: (u32, u16),
    pub series: Vec<ChartSeriesSpec>,
}

impl ChartSpec {
    /// Two growth lines over the table's data rows `1..=row_count`.
    pub fn growth_comparison(table: &ComparisonTable, benchmark_label: &str) -> Self {
        let last_row = table.row_count() as u32;
        let categories = (1, 0, last_row, 0);

        let series_for = |col: u16, line: LineStyle| ChartSeriesSpec {
            name_cell: (0, col),
            categories,
            values: (1, col, last_row, col),
            line,
        };

        ChartSpec {
            title: format!(
                "Growth of ${}: {} vs {}",
                format_thousands(GROWTH_NOTIONAL, 0),
                table.stock.label,
                benchmark_label
            ),
            x_axis: "Date".to_string(),
            y_axis: "Portfolio Value ($)".to_string(),
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            anchor: CHART_ANCHOR,
            series: vec![
                series_for(
                    STOCK_GROWTH_COLUMN,
                    LineStyle {
                        color: LineColor::Green,
                        dash: LineDash::Solid,
                        width: 2.0,
                    },
                ),
                series_for(
                    BENCHMARK_GROWTH_COLUMN,
                    LineStyle {
                        color: LineColor::Gray,
                        dash: LineDash::Dash,
                        width: 2.0,
                    },
                ),
            ],
        }
    }
}
