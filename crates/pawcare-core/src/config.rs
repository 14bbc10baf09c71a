//! Core configuration.

use std::time::Duration;

use pawcare_api::ApiConfig;
use tracing::warn;

/// Environment variable: backend base URL.
pub const ENV_API_URL: &str = "PAWCARE_API_URL";
/// Environment variable: database file path.
pub const ENV_DB_PATH: &str = "PAWCARE_DB_PATH";
/// Environment variable: log filter directive.
pub const ENV_LOG: &str = "PAWCARE_LOG";
/// Environment variable: request timeout in seconds.
pub const ENV_API_TIMEOUT_SECS: &str = "PAWCARE_API_TIMEOUT_SECS";

/// Default log filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Client core configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    pub api: ApiConfig,
    /// Database file (None = in-memory)
    pub database_path: Option<String>,
    pub log_filter: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            database_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CoreConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unset or invalid values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api.base_url = url.trim().to_string();
        }

        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.trim().is_empty()) {
            config.database_path = Some(path);
        }

        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(raw) = lookup(ENV_API_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.api.timeout = Some(Duration::from_secs(secs)),
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_API_TIMEOUT_SECS),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CoreConfig::default());
        assert!(config.api.timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_API_URL, "http://localhost:5000"),
            (ENV_DB_PATH, "/tmp/pawcare.db"),
            (ENV_LOG, "pawcare_core=debug"),
            (ENV_API_TIMEOUT_SECS, "15"),
        ]));

        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.database_path.as_deref(), Some("/tmp/pawcare.db"));
        assert_eq!(config.log_filter, "pawcare_core=debug");
        assert_eq!(config.api.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_timeout_ignored() {
        let config = CoreConfig::from_lookup(lookup(&[(ENV_API_TIMEOUT_SECS, "soon")]));
        assert!(config.api.timeout.is_none());

        let config = CoreConfig::from_lookup(lookup(&[(ENV_API_TIMEOUT_SECS, "0")]));
        assert!(config.api.timeout.is_none());
    }
}
