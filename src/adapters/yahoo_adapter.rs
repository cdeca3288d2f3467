//! Yahoo Finance chart API adapter.
//!
//! Fetches daily bars over blocking HTTP. Provider timestamps mark the
//! session open in UTC; they are shifted by the exchange's `gmtoffset`
//! before taking the calendar date, so every bar carries a timezone-naive
//! exchange-local date.

use crate::domain::error::StockbenchError;
use crate::domain::price_bar::PriceBar;
use crate::ports::data_port::PriceDataPort;
use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Vec<Option<f64>>,
}

pub struct YahooAdapter {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl YahooAdapter {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StockbenchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| StockbenchError::Fetch {
                symbol: String::new(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Url, StockbenchError> {
        let url_err = |reason: String| StockbenchError::Fetch {
            symbol: symbol.to_string(),
            reason,
        };

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| url_err(format!("invalid base url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| url_err(format!("base url {} cannot take a path", self.base_url)))?
            .push(symbol);

        // period2 is exclusive; push it to the end of `end`.
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end.and_time(NaiveTime::MIN).and_utc().timestamp() + 86_400;

        url.query_pairs_mut()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "div,split");
        Ok(url)
    }

    fn parse_response(symbol: &str, json: &str) -> Result<Vec<PriceBar>, StockbenchError> {
        let response: ChartResponse =
            serde_json::from_str(json).map_err(|e| StockbenchError::Fetch {
                symbol: symbol.to_string(),
                reason: format!("unexpected response: {e}"),
            })?;

        if let Some(error) = response.chart.error {
            return Err(StockbenchError::Provider {
                symbol: symbol.to_string(),
                code: error.code,
                description: error.description,
            });
        }

        let no_data = || StockbenchError::NoData {
            symbol: symbol.to_string(),
        };
        let results = response.chart.result.ok_or_else(no_data)?;
        let data = results.first().ok_or_else(no_data)?;
        let quote = data.indicators.quote.first().ok_or_else(no_data)?;
        let adjusted = data.indicators.adjclose.as_ref().and_then(|a| a.first());

        let mut bars = Vec::with_capacity(data.timestamp.len());
        for (i, &ts) in data.timestamp.iter().enumerate() {
            let Some(close) = quote.close.get(i).copied().flatten() else {
                continue;
            };
            let adj_close = adjusted
                .and_then(|a| a.adjclose.get(i).copied().flatten())
                .unwrap_or(close);
            let Some(date) = exchange_date(ts, data.meta.gmtoffset) else {
                continue;
            };
            bars.push(PriceBar {
                symbol: symbol.to_string(),
                date,
                close,
                adj_close,
            });
        }

        if bars.is_empty() {
            return Err(no_data());
        }
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

/// Exchange-local calendar date of a UTC timestamp.
fn exchange_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp.checked_add(gmtoffset)?, 0).map(|dt| dt.date_naive())
}

impl PriceDataPort for YahooAdapter {
    fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, StockbenchError> {
        let url = self.build_url(symbol, start, end)?;
        debug!(%url, "requesting chart data");

        let fetch_err = |e: reqwest::Error| StockbenchError::Fetch {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        };
        let response = self.client.get(url).send().map_err(fetch_err)?;
        let status = response.status();
        let body = response.text().map_err(fetch_err)?;

        // Yahoo reports unknown symbols as 404 with a JSON error body.
        match Self::parse_response(symbol, &body) {
            Err(StockbenchError::Fetch { .. }) if !status.is_success() => {
                Err(StockbenchError::Fetch {
                    symbol: symbol.to_string(),
                    reason: format!("HTTP {status}"),
                })
            }
            other => other.map(|bars| {
                bars.into_iter()
                    .filter(|b| b.date >= start && b.date <= end)
                    .collect()
            }),
        }
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}
