//! Port traits decoupling the pipeline from providers and output formats.

pub mod config_port;
pub mod data_port;
pub mod report_port;
