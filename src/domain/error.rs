//! Domain error types.

/// Top-level error type for stockbench.
#[derive(Debug, thiserror::Error)]
pub enum StockbenchError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to fetch {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },

    #[error("provider error for {symbol} [{code}]: {description}")]
    Provider {
        symbol: String,
        code: String,
        description: String,
    },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("{stock} and {benchmark} share no trading dates")]
    NoOverlap { stock: String, benchmark: String },

    #[error("failed to write {path}: {reason}")]
    Export { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockbenchError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        StockbenchError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            StockbenchError::Io(_) => 1,
            StockbenchError::ConfigParse { .. }
            | StockbenchError::ConfigMissing { .. }
            | StockbenchError::ConfigInvalid { .. } => 2,
            StockbenchError::Fetch { .. } | StockbenchError::Provider { .. } => 3,
            StockbenchError::NoData { .. } | StockbenchError::NoOverlap { .. } => 5,
            StockbenchError::Export { .. } => 6,
        }
    }
}

impl From<&StockbenchError> for std::process::ExitCode {
    fn from(err: &StockbenchError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
