//! Core domain types and logic.

pub mod analysis;
pub mod chart;
pub mod config_validation;
pub mod error;
pub mod metrics;
pub mod price_bar;
pub mod price_series;
pub mod returns;
