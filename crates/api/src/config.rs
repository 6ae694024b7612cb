//! Runtime configuration, read from `MINITRACK_*` environment variables.

use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

use minitrack_observability::LogFormat;

pub const ENV_BIND_ADDR: &str = "MINITRACK_BIND_ADDR";
pub const ENV_LOG_FORMAT: &str = "MINITRACK_LOG_FORMAT";
pub const ENV_APP_ENV: &str = "MINITRACK_APP_ENV";
pub const ENV_HISTORY_GROUP_WINDOW_SECS: &str = "MINITRACK_HISTORY_GROUP_WINDOW_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("history group window of {0}s is out of range")]
    WindowOutOfRange(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    /// Deployment label reported by `/health`.
    pub app_env: String,
    /// Default window for merging adjacent history entries; `None` keeps every event.
    pub history_group_window: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::Json,
            app_env: "dev".to_string(),
            history_group_window: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source; unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BIND_ADDR) {
            config.bind_addr = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: ENV_BIND_ADDR,
                reason: format!("{e}"),
            })?;
        }

        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log_format = raw.parse().map_err(|reason| ConfigError::Invalid {
                var: ENV_LOG_FORMAT,
                reason,
            })?;
        }

        if let Some(raw) = lookup(ENV_APP_ENV) {
            config.app_env = raw.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_HISTORY_GROUP_WINDOW_SECS) {
            let secs: u32 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: ENV_HISTORY_GROUP_WINDOW_SECS,
                reason: format!("{e}"),
            })?;
            config.history_group_window = window_from_secs(secs.into())?;
        }

        Ok(config)
    }
}

/// `0` disables grouping.
pub fn window_from_secs(secs: u64) -> Result<Option<Duration>, ConfigError> {
    if secs == 0 {
        return Ok(None);
    }
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .map(Some)
        .ok_or(ConfigError::WindowOutOfRange(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.history_group_window.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (ENV_BIND_ADDR, "127.0.0.1:9000"),
            (ENV_LOG_FORMAT, "pretty"),
            (ENV_APP_ENV, "prod"),
            (ENV_HISTORY_GROUP_WINDOW_SECS, "300"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.app_env, "prod");
        assert_eq!(config.history_group_window, Some(Duration::seconds(300)));
    }

    #[test]
    fn zero_window_disables_grouping() {
        let config =
            ApiConfig::from_lookup(lookup_from(&[(ENV_HISTORY_GROUP_WINDOW_SECS, "0")])).unwrap();
        assert!(config.history_group_window.is_none());
    }

    #[test]
    fn window_beyond_duration_range_is_rejected() {
        assert_eq!(window_from_secs(0), Ok(None));
        assert_eq!(window_from_secs(300), Ok(Some(Duration::seconds(300))));
        assert_eq!(
            window_from_secs(u64::MAX),
            Err(ConfigError::WindowOutOfRange(u64::MAX))
        );
        // Fits in i64 but not in a chrono Duration.
        let too_long = i64::MAX as u64 / 10;
        assert_eq!(
            window_from_secs(too_long),
            Err(ConfigError::WindowOutOfRange(too_long))
        );
    }

    #[test]
    fn malformed_values_name_the_variable() {
        let err = ApiConfig::from_lookup(lookup_from(&[(ENV_BIND_ADDR, "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_BIND_ADDR, .. }));

        let err =
            ApiConfig::from_lookup(lookup_from(&[(ENV_LOG_FORMAT, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_LOG_FORMAT, .. }));

        let err = ApiConfig::from_lookup(lookup_from(&[(ENV_HISTORY_GROUP_WINDOW_SECS, "-5")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_HISTORY_GROUP_WINDOW_SECS, .. }));
    }
}
