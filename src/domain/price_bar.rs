//! Daily price observation and price-field selection.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// One trading day as reported by a price provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub close: f64,
    /// Close adjusted for splits and dividends. Providers without an
    /// adjusted series repeat the raw close here.
    pub adj_close: f64,
}

impl PriceBar {
    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Adjusted => self.adj_close,
            PriceField::Close => self.close,
        }
    }
}

/// Which provider price the analysis runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceField {
    /// Split- and dividend-adjusted close.
    #[default]
    Adjusted,
    /// Raw exchange close.
    Close,
}

impl FromStr for PriceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adjusted" | "adj_close" | "adj" => Ok(PriceField::Adjusted),
            "close" | "raw" => Ok(PriceField::Close),
            other => Err(format!(
                "unknown price field '{other}' (expected adjusted or close)"
            )),
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceField::Adjusted => write!(f, "adjusted"),
            PriceField::Close => write!(f, "close"),
        }
    }
}
