//! Date-indexed price series and two-series alignment.

use crate::domain::error::StockbenchError;
use crate::domain::price_bar::{PriceBar, PriceField};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from provider bars. Bars are sorted by date and a
    /// repeated date keeps the last bar seen.
    pub fn from_bars(symbol: &str, bars: &[PriceBar], field: PriceField) -> Self {
        let by_date: BTreeMap<NaiveDate, f64> =
            bars.iter().map(|b| (b.date, b.price(field))).collect();
        let (dates, prices) = by_date.into_iter().unzip();
        Self {
            symbol: symbol.to_string(),
            dates,
            prices,
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    fn date_index(&self) -> HashMap<NaiveDate, usize> {
        self.dates.iter().enumerate().map(|(i, &d)| (d, i)).collect()
    }
}

/// Result of joining two series on their common dates.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub dates: Vec<NaiveDate>,
    pub stock: PriceSeries,
    pub benchmark: PriceSeries,
    /// Dates present in only one of the inputs.
    pub dropped: usize,
}

/// Inner-join two series on date. Both outputs share `dates` exactly.
pub fn align(stock: &PriceSeries, benchmark: &PriceSeries) -> Result<AlignedPair, StockbenchError> {
    if stock.is_empty() {
        return Err(StockbenchError::NoData {
            symbol: stock.symbol.clone(),
        });
    }
    if benchmark.is_empty() {
        return Err(StockbenchError::NoData {
            symbol: benchmark.symbol.clone(),
        });
    }

    let bench_index = benchmark.date_index();
    let mut dates = Vec::with_capacity(stock.len().min(benchmark.len()));
    let mut stock_prices = Vec::with_capacity(dates.capacity());
    let mut bench_prices = Vec::with_capacity(dates.capacity());

    for (i, date) in stock.dates.iter().enumerate() {
        if let Some(&j) = bench_index.get(date) {
            dates.push(*date);
            stock_prices.push(stock.prices[i]);
            bench_prices.push(benchmark.prices[j]);
        }
    }

    if dates.is_empty() {
        return Err(StockbenchError::NoOverlap {
            stock: stock.symbol.clone(),
            benchmark: benchmark.symbol.clone(),
        });
    }

    let dropped = (stock.len() - dates.len()) + (benchmark.len() - dates.len());

    Ok(AlignedPair {
        stock: PriceSeries {
            symbol: stock.symbol.clone(),
            dates: dates.clone(),
            prices: stock_prices,
        },
        benchmark: PriceSeries {
            symbol: benchmark.symbol.clone(),
            dates: dates.clone(),
            prices: bench_prices,
        },
        dates,
        dropped,
    })
}
