//! Startup configuration read from the environment (and `.env` if present).

use std::env;
use std::str::FromStr;

use crate::backend::domain::alerts::{AlertPolicy, DEFAULT_HORIZON_DAYS};

pub const BACKEND_KEY: &str = "MYCAR_BACKEND";
pub const API_URL_KEY: &str = "MYCAR_API_URL";
pub const DATABASE_URL_KEY: &str = "MYCAR_DATABASE_URL";
pub const LOG_KEY: &str = "MYCAR_LOG";
pub const HORIZON_KEY: &str = "MYCAR_ALERT_HORIZON_DAYS";
pub const INCLUDE_EXPIRED_KEY: &str = "MYCAR_ALERT_INCLUDE_EXPIRED";
pub const DEDUPE_KEY: &str = "MYCAR_ALERT_DEDUPE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// Where vehicles, maintenance and expenses live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// HTTP API for entities, local store for alerts
    Remote,
    /// Local SQLite store for everything
    Local,
}

impl FromStr for BackendMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(BackendMode::Remote),
            "local" => Ok(BackendMode::Local),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: BackendMode,
    pub api_base_url: String,
    pub database_url: String,
    pub log_filter: String,
    pub alert_policy: AlertPolicy,
}

impl AppConfig {
    /// Read the process environment, loading `.env` first when one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let defaults = AlertPolicy::default();
        let alert_policy = AlertPolicy {
            horizon_days: parsed(&lookup, HORIZON_KEY, DEFAULT_HORIZON_DAYS)?,
            include_expired: parsed(&lookup, INCLUDE_EXPIRED_KEY, defaults.include_expired)?,
            deduplicate: parsed(&lookup, DEDUPE_KEY, defaults.deduplicate)?,
        };

        Ok(Self {
            mode: parsed(&lookup, BACKEND_KEY, BackendMode::Remote)?,
            api_base_url: text(API_URL_KEY, "http://localhost:8080").trim_end_matches('/').to_string(),
            database_url: text(DATABASE_URL_KEY, "sqlite:mycar.db"),
            log_filter: text(LOG_KEY, "mycar=info"),
            alert_policy,
        })
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("defaults should be valid");
        assert_eq!(config.mode, BackendMode::Remote);
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.database_url, "sqlite:mycar.db");
        assert_eq!(config.log_filter, "mycar=info");
        assert_eq!(config.alert_policy, AlertPolicy::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (BACKEND_KEY, "Local"),
            (API_URL_KEY, "https://api.mycar.cl/"),
            (HORIZON_KEY, "30"),
            (INCLUDE_EXPIRED_KEY, "true"),
            (DEDUPE_KEY, "false"),
        ])
        .expect("overrides should be valid");

        assert_eq!(config.mode, BackendMode::Local);
        assert_eq!(config.api_base_url, "https://api.mycar.cl");
        assert_eq!(config.alert_policy.horizon_days, 30);
        assert!(config.alert_policy.include_expired);
        assert!(!config.alert_policy.deduplicate);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        assert_eq!(
            config_from(&[(BACKEND_KEY, "cloud")]).unwrap_err(),
            ConfigError::InvalidValue {
                key: BACKEND_KEY.to_string(),
                value: "cloud".to_string(),
            }
        );
        assert!(config_from(&[(HORIZON_KEY, "quince")]).is_err());
        assert!(config_from(&[(DEDUPE_KEY, "yes")]).is_err());
    }
}
