use std::path::PathBuf;

use crate::error::ConfigError;

pub(crate) const DB_ENV: &str = "MONTHFLOW_DB";
pub(crate) const CURRENCY_ENV: &str = "MONTHFLOW_CURRENCY";
pub(crate) const LOG_ENV: &str = "MONTHFLOW_LOG";

const DEFAULT_CURRENCY: &str = "NGN";
const DEFAULT_LOG_FILTER: &str = "info";
const DB_FILE: &str = "monthflow.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) currency: String,
    pub(crate) log_filter: String,
}

impl Config {
    /// Read `.env` (if any) and the process environment.
    pub(crate) fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let data_dir = directories::ProjectDirs::from("com", "monthflow", "MonthFlow")
            .map(|dirs| dirs.data_dir().to_path_buf());
        Self::resolve(|name| std::env::var(name).ok(), data_dir)
    }

    /// Build a config from a variable lookup and the platform data directory.
    ///
    /// The store location is required: it comes from `MONTHFLOW_DB` or, failing
    /// that, the data directory. With neither, startup cannot continue.
    pub(crate) fn resolve<F>(lookup: F, data_dir: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let db_path = match set(DB_ENV) {
            Some(path) => PathBuf::from(shellexpand(path.trim())),
            None => data_dir
                .map(|dir| dir.join(DB_FILE))
                .ok_or_else(|| {
                    ConfigError::Missing(format!(
                        "no data directory for this platform; set {DB_ENV} to a database file path"
                    ))
                })?,
        };

        let currency = match lookup(CURRENCY_ENV) {
            None => DEFAULT_CURRENCY.to_string(),
            Some(value) => {
                let value = value.trim().to_string();
                if value.is_empty() || value.chars().count() > 8 {
                    return Err(ConfigError::Invalid {
                        name: CURRENCY_ENV,
                        reason: format!("expected a short currency label, got '{value}'"),
                    });
                }
                value
            }
        };

        let log_filter = set(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            currency,
            log_filter,
        })
    }

    /// Log file lives next to the database.
    pub(crate) fn log_path(&self) -> PathBuf {
        self.db_path.with_file_name("monthflow.log")
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
