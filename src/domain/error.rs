//! Domain error types.
//!
//! Recoverable conditions (no trading day in the lookahead window, an
//! indicator short on warm-up history, an empty weekly selection) are not
//! errors: the backtest skips and continues. Only conditions that prevent a
//! run from starting at all are represented here.

/// Top-level error type for meanrev.
#[derive(Debug, thiserror::Error)]
pub enum MeanrevError {
    #[error("failed to load price data: {reason}")]
    DataLoad { reason: String },

    #[error("price table contains no instruments")]
    EmptyTable,

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

    #[error("broker error: {reason}")]
    Broker { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MeanrevError> for std::process::ExitCode {
    fn from(err: &MeanrevError) -> Self {
        let code: u8 = match err {
            MeanrevError::Io(_) => 1,
            MeanrevError::ConfigParse { .. }
            | MeanrevError::ConfigMissing { .. }
            | MeanrevError::ConfigInvalid { .. } => 2,
            MeanrevError::DataLoad { .. } | MeanrevError::EmptyTable => 3,
            MeanrevError::Broker { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
