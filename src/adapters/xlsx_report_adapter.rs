//! Excel workbook adapter implementing ReportPort.
//!
//! Writes the comparison table to a single `Data` worksheet and embeds a
//! native line chart built from a [`ChartSpec`].

use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{
    Chart, ChartFormat, ChartLine, ChartLineDashType, ChartType, Color, ExcelDateTime, Format,
    FormatBorder, Workbook, Worksheet, XlsxError,
};

use crate::domain::analysis::ComparisonTable;
use crate::domain::chart::{ChartSpec, DATA_SHEET, LineColor, LineDash, LineStyle};
use crate::domain::error::StockbenchError;
use crate::ports::report_port::ReportPort;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATE_COLUMN_WIDTH: f64 = 12.0;
const VALUE_COLUMN_WIDTH: f64 = 18.0;

pub struct XlsxReportAdapter;

impl XlsxReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn write_table(worksheet: &mut Worksheet, table: &ComparisonTable) -> Result<(), XlsxError> {
        let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
        let date_format = Format::new().set_num_format(DATE_FORMAT);

        for (col, header) in table.headers().iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }
        worksheet.set_column_width(0, DATE_COLUMN_WIDTH)?;
        for col in 1..table.headers().len() as u16 {
            worksheet.set_column_width(col, VALUE_COLUMN_WIDTH)?;
        }

        let columns = table.value_columns();
        for (i, date) in table.dates.iter().enumerate() {
            let row = i as u32 + 1;
            let excel_date =
                ExcelDateTime::from_ymd(date.year() as u16, date.month() as u8, date.day() as u8)?;
            worksheet.write_datetime_with_format(row, 0, &excel_date, &date_format)?;

            for (c, column) in columns.iter().enumerate() {
                worksheet.write_number(row, c as u16 + 1, column[i])?;
            }
        }
        Ok(())
    }

    fn build_chart(spec: &ChartSpec) -> Chart {
        let mut chart = Chart::new(ChartType::Line);

        for series in &spec.series {
            let (name_row, name_col) = series.name_cell;
            let (c0, c1, c2, c3) = series.categories;
            let (v0, v1, v2, v3) = series.values;
            chart
                .add_series()
                .set_name((DATA_SHEET, name_row, name_col))
                .set_categories((DATA_SHEET, c0, c1, c2, c3))
                .set_values((DATA_SHEET, v0, v1, v2, v3))
                .set_format(ChartFormat::new().set_line(&chart_line(&series.line)));
        }

        chart.title().set_name(spec.title.as_str());
        chart.x_axis().set_name(spec.x_axis.as_str());
        chart.y_axis().set_name(spec.y_axis.as_str());
        chart.set_width(spec.width).set_height(spec.height);
        chart
    }

    fn write_workbook(
        table: &ComparisonTable,
        spec: &ChartSpec,
        output_path: &Path,
    ) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(DATA_SHEET)?;

        Self::write_table(worksheet, table)?;

        let chart = Self::build_chart(spec);
        let (row, col) = spec.anchor;
        worksheet.insert_chart(row, col, &chart)?;

        workbook.save(output_path)
    }
}

impl Default for XlsxReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn chart_line(style: &LineStyle) -> ChartLine {
    let mut line = ChartLine::new();
    line.set_color(match style.color {
        LineColor::Green => Color::Green,
        LineColor::Gray => Color::Gray,
    })
    .set_width(style.width);
    if style.dash == LineDash::Dash {
        line.set_dash_type(ChartLineDashType::Dash);
    }
    line
}

impl ReportPort for XlsxReportAdapter {
    fn write(
        &self,
        table: &ComparisonTable,
        chart: &ChartSpec,
        output_path: &Path,
    ) -> Result<(), StockbenchError> {
        Self::write_workbook(table, chart, output_path).map_err(|e| StockbenchError::Export {
            path: output_path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::SeriesMetrics;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn sample_table() -> ComparisonTable {
        let dates: Vec<NaiveDate> = [2, 3, 4]
            .iter()
            .map(|&d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .collect();
        ComparisonTable {
            dates,
            stock: SeriesMetrics::compute("NVDA", &[100.0, 110.0, 99.0]),
            benchmark: SeriesMetrics::compute("Market", &[4800.0, 4810.0, 4750.0]),
        }
    }

    #[test]
    fn writes_xlsx_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");
        let table = sample_table();
        let spec = ChartSpec::growth_comparison(&table, "S&P 500");

        XlsxReportAdapter::new().write(&table, &spec, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.len() > 1000);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");
        fs::write(&path, "stale").unwrap();

        let table = sample_table();
        let spec = ChartSpec::growth_comparison(&table, "S&P 500");
        XlsxReportAdapter::new().write(&table, &spec, &path).unwrap();

        assert_ne!(fs::read(&path).unwrap(), b"stale");
    }

    #[test]
    fn unwritable_path_is_export_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");
        let table = sample_table();
        let spec = ChartSpec::growth_comparison(&table, "S&P 500");

        let err = XlsxReportAdapter::new().write(&table, &spec, &path).unwrap_err();
        assert!(matches!(err, StockbenchError::Export { .. }));
        assert_eq!(err.exit_status(), 6);
    }
}
