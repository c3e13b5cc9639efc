use thiserror::Error;

/// Failures of the record store. A missing record is not one of them:
/// lookups return `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("Stored record '{key}' is unreadable: {detail}")]
    Corrupt { key: String, detail: String },
}

impl StoreError {
    pub(crate) fn corrupt(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            detail: detail.into(),
        }
    }
}

/// Startup configuration problems. Both are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
