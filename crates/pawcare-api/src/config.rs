//! API client configuration.

use std::time::Duration;

/// Fixed backend host used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://pawcare-api.azurewebsites.net";

/// API client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL that request paths are joined onto
    pub base_url: String,
    /// Whole-request timeout (None = transport default, unbounded)
    pub timeout: Option<Duration>,
    /// Connection timeout
    pub connect_timeout: Option<Duration>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            user_agent: format!("pawcare-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }
}

/// Builder for [`ApiConfig`].
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    config: ApiConfig,
}

impl ApiConfigBuilder {
    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ApiConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ApiConfig::builder()
            .base_url("http://localhost:5000")
            .timeout(Duration::from_secs(5))
            .build();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
