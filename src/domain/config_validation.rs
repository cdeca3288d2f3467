//! Configuration validation.
//!
//! Runs against the merged configuration (file values plus command-line
//! overrides) before any network or file I/O happens.

use crate::domain::analysis::{DEFAULT_BENCHMARK, DEFAULT_STOCK, DEFAULT_YEARS};
use crate::domain::error::StockbenchError;
use crate::domain::price_bar::PriceField;
use crate::ports::config_port::ConfigPort;

pub const MAX_YEARS: u32 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    validate_symbols(config)?;
    validate_years(config)?;
    validate_price_field(config)?;
    validate_output_path(config)?;
    Ok(())
}

pub fn validate_source_config(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    let provider = config
        .get_string("source", "provider")
        .unwrap_or_else(|| "yahoo".to_string());

    match provider.trim().to_lowercase().as_str() {
        "yahoo" => {
            validate_base_url(config)?;
            validate_timeout(config)
        }
        "csv" => match config.get_string("source", "data_dir") {
            Some(dir) if !dir.trim().is_empty() => Ok(()),
            _ => Err(StockbenchError::ConfigMissing {
                section: "source".to_string(),
                key: "data_dir".to_string(),
            }),
        },
        other => Err(StockbenchError::invalid(
            "source",
            "provider",
            format!("unknown provider '{other}' (expected yahoo or csv)"),
        )),
    }
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    for key in ["stock", "benchmark"] {
        if let Some(v) = config.get_string("analysis", key) {
            if v.trim().is_empty() {
                return Err(StockbenchError::invalid(
                    "analysis",
                    key,
                    format!("{key} must not be empty"),
                ));
            }
        }
    }

    let stock = config.get_string_or("analysis", "stock", DEFAULT_STOCK);
    let benchmark = config.get_string_or("analysis", "benchmark", DEFAULT_BENCHMARK);
    if stock.eq_ignore_ascii_case(&benchmark) {
        return Err(StockbenchError::invalid(
            "analysis",
            "benchmark",
            "benchmark must differ from stock",
        ));
    }
    Ok(())
}

fn validate_years(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    years(config).map(|_| ())
}

/// Window length in years: `DEFAULT_YEARS` when unset, else an integer in
/// `1..=MAX_YEARS`.
pub fn years(config: &dyn ConfigPort) -> Result<u32, StockbenchError> {
    let Some(raw) = config.get_string("analysis", "years") else {
        return Ok(DEFAULT_YEARS);
    };
    let years: i64 = raw.trim().parse().map_err(|_| {
        StockbenchError::invalid("analysis", "years", format!("'{raw}' is not an integer"))
    })?;
    u32::try_from(years)
        .ok()
        .filter(|y| (1..=MAX_YEARS).contains(y))
        .ok_or_else(|| {
            StockbenchError::invalid(
                "analysis",
                "years",
                format!("years must be between 1 and {MAX_YEARS}"),
            )
        })
}

fn validate_price_field(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    match config.get_string("analysis", "price_field") {
        Some(raw) => raw
            .parse::<PriceField>()
            .map(|_| ())
            .map_err(|reason| StockbenchError::invalid("analysis", "price_field", reason)),
        None => Ok(()),
    }
}

fn validate_output_path(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    let Some(path) = config.get_string("output", "path") else {
        return Ok(());
    };
    let path = path.trim();
    if path.is_empty() {
        return Err(StockbenchError::invalid(
            "output",
            "path",
            "path must not be empty",
        ));
    }
    if !path.to_lowercase().ends_with(".xlsx") {
        return Err(StockbenchError::invalid(
            "output",
            "path",
            "output file must have an .xlsx extension",
        ));
    }
    Ok(())
}

fn validate_base_url(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    match config.get_string("source", "base_url") {
        Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
            Err(StockbenchError::invalid(
                "source",
                "base_url",
                "base_url must start with http:// or https://",
            ))
        }
        _ => Ok(()),
    }
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), StockbenchError> {
    timeout_secs(config).map(|_| ())
}

/// HTTP timeout: `DEFAULT_TIMEOUT_SECS` when unset, else a positive integer.
pub fn timeout_secs(config: &dyn ConfigPort) -> Result<u64, StockbenchError> {
    let Some(raw) = config.get_string("source", "timeout_secs") else {
        return Ok(DEFAULT_TIMEOUT_SECS);
    };
    let secs: i64 = raw.trim().parse().map_err(|_| {
        StockbenchError::invalid(
            "source",
            "timeout_secs",
            format!("'{raw}' is not an integer"),
        )
    })?;
    u64::try_from(secs)
        .ok()
        .filter(|&s| s > 0)
        .ok_or_else(|| {
            StockbenchError::invalid("source", "timeout_secs", "timeout_secs must be positive")
        })
}
