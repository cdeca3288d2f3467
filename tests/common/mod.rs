#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use stockbench::domain::error::StockbenchError;
pub use stockbench::domain::price_bar::PriceBar;
use stockbench::ports::data_port::PriceDataPort;

pub struct MockPriceDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockPriceDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PriceDataPort for MockPriceDataPort {
    fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, StockbenchError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StockbenchError::Fetch {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        let bars: Vec<PriceBar> = self
            .data
            .get(symbol)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        if bars.is_empty() {
            return Err(StockbenchError::NoData {
                symbol: symbol.to_string(),
            });
        }
        Ok(bars)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

pub fn make_bar(symbol: &str, date: &str, close: f64) -> PriceBar {
    PriceBar {
        symbol: symbol.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        close,
        adj_close: close,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `count` consecutive calendar days of bars, price rising by `step` a day.
/// The adjusted close trails the raw close by one percent.
pub fn generate_bars(
    symbol: &str,
    start_date: &str,
    count: usize,
    start_price: f64,
    step: f64,
) -> Vec<PriceBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let close = start_price + step * i as f64;
            PriceBar {
                symbol: symbol.to_string(),
                date: start + chrono::Duration::days(i as i64),
                close,
                adj_close: close * 0.99,
            }
        })
        .collect()
}
