//! CSV directory price adapter.
//!
//! Reads `<SYMBOL>.csv` files (non-alphanumeric symbol characters replaced
//! by `_`, so `^GSPC` lives in `_GSPC.csv`) with the header
//! `date,close[,adj_close]`. A missing `adj_close` column repeats the close.

use crate::domain::error::StockbenchError;
use crate::domain::price_bar::PriceBar;
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn file_name(symbol: &str) -> String {
        let stem: String = symbol
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{stem}.csv")
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(Self::file_name(symbol))
    }
}

/// A price cell: finite and strictly positive.
fn parse_field(value: Option<&str>, column: &str, symbol: &str) -> Result<f64, StockbenchError> {
    let price: f64 = value
        .ok_or_else(|| StockbenchError::Fetch {
            symbol: symbol.to_string(),
            reason: format!("missing {column} column"),
        })?
        .trim()
        .parse()
        .map_err(|e| StockbenchError::Fetch {
            symbol: symbol.to_string(),
            reason: format!("invalid {column} value: {e}"),
        })?;
    if !price.is_finite() || price <= 0.0 {
        return Err(StockbenchError::Fetch {
            symbol: symbol.to_string(),
            reason: format!("invalid {column} value: {price} is not a positive price"),
        });
    }
    Ok(price)
}

impl PriceDataPort for CsvAdapter {
    fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, StockbenchError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| StockbenchError::Fetch {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let has_adj = rdr
            .headers()
            .map(|h| h.iter().any(|c| c.trim() == "adj_close"))
            .map_err(|e| StockbenchError::Fetch {
                symbol: symbol.to_string(),
                reason: format!("CSV header error: {e}"),
            })?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| StockbenchError::Fetch {
                symbol: symbol.to_string(),
                reason: format!("CSV parse error: {e}"),
            })?;

            let date_str = record.get(0).ok_or_else(|| StockbenchError::Fetch {
                symbol: symbol.to_string(),
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                StockbenchError::Fetch {
                    symbol: symbol.to_string(),
                    reason: format!("invalid date format: {e}"),
                }
            })?;

            if date < start || date > end {
                continue;
            }

            let close = parse_field(record.get(1), "close", symbol)?;
            let adj_close = if has_adj {
                parse_field(record.get(2), "adj_close", symbol)?
            } else {
                close
            };

            bars.push(PriceBar {
                symbol: symbol.to_string(),
                date,
                close,
                adj_close,
            });
        }

        if bars.is_empty() {
            return Err(StockbenchError::NoData {
                symbol: symbol.to_string(),
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}
