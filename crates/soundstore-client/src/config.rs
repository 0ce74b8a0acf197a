//! Catalog client configuration
//!
//! This module provides configuration structures and builders for the API client.

use std::time::Duration;

use derive_builder::Builder;
use url::Url;

use crate::error::{Error, Result};

/// Configuration for the catalog API client
///
/// Contains all the settings needed to configure client behavior, including
/// the API base URL, timeouts, and the user agent string.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "ApiBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct ApiConfig {
    /// Base URL for the catalog API
    #[builder(setter(custom), default = "ApiConfig::default_base_url()")]
    pub base_url: Url,
    /// Request timeout duration
    #[builder(default = "Duration::from_secs(30)")]
    pub timeout: Duration,
    /// Connection timeout duration
    #[builder(default = "Duration::from_secs(10)")]
    pub connect_timeout: Duration,
    /// User agent string for requests
    #[builder(default = "ApiConfig::default_user_agent()")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Create a new configuration builder
    pub fn builder() -> ApiBuilder {
        ApiBuilder::default()
    }

    fn default_base_url() -> Url {
        "https://api.soundstore.dev"
            .parse()
            .expect("Valid default URL")
    }

    fn default_user_agent() -> String {
        format!("soundstore-client/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl ApiBuilder {
    /// Set the base URL for the catalog API
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url =
            Some(url.parse().map_err(|e| {
                Error::invalid_config(format!("Invalid base URL '{}': {}", url, e))
            })?);
        Ok(self)
    }

    fn validate_config(&self) -> std::result::Result<(), String> {
        // Validate timeout values
        if let Some(timeout) = &self.timeout {
            if timeout.as_secs() == 0 {
                return Err("Timeout must be greater than 0".to_string());
            }
        }

        if let Some(connect_timeout) = &self.connect_timeout {
            if connect_timeout.as_secs() == 0 {
                return Err("Connect timeout must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ApiConfig::builder()
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("soundstore-test/0.0.0")
            .build()
            .expect("Valid config");

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "soundstore-test/0.0.0");
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();

        assert_eq!(config.base_url.as_str(), "https://api.soundstore.dev/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_custom_base_url() {
        let config = ApiConfig::builder()
            .with_base_url("https://catalog.example.com/api")
            .expect("Valid URL")
            .build()
            .expect("Valid config");

        assert_eq!(config.base_url.as_str(), "https://catalog.example.com/api");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiConfig::builder().with_base_url("not-a-valid-url");

        assert!(result.is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let result = ApiConfig::builder()
            .with_timeout(Duration::from_secs(0))
            .build();

        assert!(result.is_err());
    }
}
