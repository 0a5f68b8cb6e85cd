//! Domain error types.

/// Top-level error type for macross.
#[derive(Debug, thiserror::Error)]
pub enum MacrossError {
    #[error("invalid interval {interval:?} (expected one of 1m, 5m, 15m, 30m, 1h, 4h, 1d)")]
    InvalidInterval { interval: String },

    #[error("invalid {name} window {window}: must be a positive integer")]
    InvalidWindow { name: String, window: i64 },

    #[error("no data for {symbol} {interval} between {from} and {to}")]
    NoData {
        symbol: String,
        interval: String,
        from: i64,
        to: i64,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

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

    #[error("unknown config key [{section}] {key}")]
    UnknownConfigKey { section: String, key: String },

    #[error("unknown config section [{section}]")]
    UnknownConfigSection { section: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MacrossError {
    /// Process exit status for this error's family.
    pub fn exit_status(&self) -> u8 {
        match self {
            MacrossError::Io(_) => 1,
            MacrossError::ConfigParse { .. }
            | MacrossError::ConfigMissing { .. }
            | MacrossError::ConfigInvalid { .. }
            | MacrossError::UnknownConfigKey { .. }
            | MacrossError::UnknownConfigSection { .. } => 2,
            MacrossError::DataSource { .. } => 3,
            MacrossError::InvalidInterval { .. } | MacrossError::InvalidWindow { .. } => 4,
            MacrossError::NoData { .. } => 5,
            MacrossError::Report { .. } => 6,
        }
    }
}

impl From<&MacrossError> for std::process::ExitCode {
    fn from(err: &MacrossError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
