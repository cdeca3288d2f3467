//! Analysis parameters and the combined output table.

use crate::domain::metrics::SummaryStats;
use crate::domain::price_bar::PriceField;
use crate::domain::price_series::AlignedPair;
use crate::domain::returns::{growth_series, simple_returns, GROWTH_NOTIONAL};
use chrono::{Months, NaiveDate};
use std::path::PathBuf;

pub const DEFAULT_STOCK: &str = "NVDA";
pub const DEFAULT_BENCHMARK: &str = "^GSPC";
pub const DEFAULT_BENCHMARK_LABEL: &str = "S&P 500";
pub const DEFAULT_YEARS: u32 = 5;

/// Column prefix used for the benchmark in the output table.
pub const BENCHMARK_COLUMN_PREFIX: &str = "Market";

/// Fixed-length lookback ending on the run date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingWindow {
    pub years: u32,
}

impl TrailingWindow {
    pub fn new(years: u32) -> Self {
        Self { years }
    }

    /// `(start, end)` with `end == today`. Falls back to the earliest
    /// representable date if the subtraction underflows.
    pub fn resolve(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = today
            .checked_sub_months(Months::new(self.years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);
        (start, today)
    }
}

impl Default for TrailingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_YEARS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub stock: String,
    pub benchmark: String,
    /// Human-readable benchmark name used in the chart title.
    pub benchmark_label: String,
    pub window: TrailingWindow,
    pub price_field: PriceField,
    pub output_path: PathBuf,
}

impl AnalysisConfig {
    pub fn default_output_path(stock: &str) -> PathBuf {
        let safe: String = stock
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        PathBuf::from(format!("Project1_{safe}_Analysis.xlsx"))
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stock: DEFAULT_STOCK.to_string(),
            benchmark: DEFAULT_BENCHMARK.to_string(),
            benchmark_label: DEFAULT_BENCHMARK_LABEL.to_string(),
            window: TrailingWindow::default(),
            price_field: PriceField::default(),
            output_path: Self::default_output_path(DEFAULT_STOCK),
        }
    }
}

/// Prices, returns and growth for one identifier, all on the table's index.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMetrics {
    /// Column prefix: the stock symbol, or `Market` for the benchmark.
    pub label: String,
    pub prices: Vec<f64>,
    pub returns: Vec<f64>,
    pub growth: Vec<f64>,
}

impl SeriesMetrics {
    pub fn compute(label: &str, prices: &[f64]) -> Self {
        let returns = simple_returns(prices);
        let growth = growth_series(&returns, GROWTH_NOTIONAL);
        Self {
            label: label.to_string(),
            prices: prices.to_vec(),
            returns,
            growth,
        }
    }

    pub fn summary(&self) -> SummaryStats {
        SummaryStats::compute(&self.prices, &self.returns)
    }
}

/// Row-aligned output table. Column order is fixed:
/// date, price ×2, return ×2, growth ×2.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub dates: Vec<NaiveDate>,
    pub stock: SeriesMetrics,
    pub benchmark: SeriesMetrics,
}

impl ComparisonTable {
    pub fn build(pair: &AlignedPair) -> Self {
        Self {
            dates: pair.dates.clone(),
            stock: SeriesMetrics::compute(&pair.stock.symbol, &pair.stock.prices),
            benchmark: SeriesMetrics::compute(BENCHMARK_COLUMN_PREFIX, &pair.benchmark.prices),
        }
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    /// Header names in column order, starting with the date column.
    pub fn headers(&self) -> Vec<String> {
        let s = &self.stock.label;
        let b = &self.benchmark.label;
        vec![
            "Date".to_string(),
            format!("{s}_Price"),
            format!("{b}_Price"),
            format!("{s}_Return"),
            format!("{b}_Return"),
            format!("{s}_10k_Growth"),
            format!("{b}_10k_Growth"),
        ]
    }

    /// Numeric value columns (everything after the date), in header order.
    pub fn value_columns(&self) -> [&[f64]; 6] {
        [
            &self.stock.prices,
            &self.benchmark.prices,
            &self.stock.returns,
            &self.benchmark.returns,
            &self.stock.growth,
            &self.benchmark.growth,
        ]
    }
}

/// Sheet column holding the stock growth series.
pub const STOCK_GROWTH_COLUMN: u16 = 5;
/// Sheet column holding the benchmark growth series.
pub const BENCHMARK_GROWTH_COLUMN: u16 = 6;
