//! Endpoint configuration for the Pinata provider.

use serde::{Deserialize, Serialize};
use url::Url;

use pinning_core::error::{PinningError, Result};

/// Pinata REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.pinata.cloud";

/// Public Pinata gateway used for gateway URLs.
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud";

/// Pinata provider configuration.
///
/// Credentials are not part of the config; they are handed to
/// [`PinataProvider::with_config`](crate::PinataProvider::with_config) directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinataConfig {
    /// API base URL (e.g. "https://api.pinata.cloud")
    pub api_url: String,
    /// Gateway base URL (e.g. "https://gateway.pinata.cloud")
    pub gateway_url: String,
    /// Request timeout in seconds; `None` keeps the HTTP client default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            gateway_url: DEFAULT_GATEWAY_URL.into(),
            timeout_seconds: None,
        }
    }
}

impl PinataConfig {
    /// Reads overrides from the environment (and `.env`, if present).
    ///
    /// Recognised variables: `PINATA_API_URL`, `PINATA_GATEWAY_URL`,
    /// `PINATA_TIMEOUT_SECONDS`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Ok(url) = std::env::var("PINATA_API_URL") {
            config = config.with_api_url(url);
        }
        if let Ok(url) = std::env::var("PINATA_GATEWAY_URL") {
            config = config.with_gateway_url(url);
        }
        if let Ok(secs) = std::env::var("PINATA_TIMEOUT_SECONDS") {
            let secs = secs.trim().parse().map_err(|_| {
                PinataConfig::invalid(format!("PINATA_TIMEOUT_SECONDS is not a number: {}", secs))
            })?;
            config = config.with_timeout(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Overrides the API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the gateway base URL.
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets a request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Checks that both base URLs are absolute http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [("API", &self.api_url), ("gateway", &self.gateway_url)] {
            let url = Url::parse(value)
                .map_err(|e| Self::invalid(format!("invalid {} URL '{}': {}", label, value, e)))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(Self::invalid(format!(
                    "{} URL must use http or https, got '{}'",
                    label,
                    url.scheme()
                )));
            }
        }
        Ok(())
    }

    fn invalid(msg: String) -> PinningError {
        PinningError::ConfigError(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hosts() {
        let config = PinataConfig::default();
        assert_eq!(config.api_url, "https://api.pinata.cloud");
        assert_eq!(config.gateway_url, "https://gateway.pinata.cloud");
        assert!(config.timeout_seconds.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let config = PinataConfig::default()
            .with_api_url("http://127.0.0.1:8080/")
            .with_gateway_url("https://my.gateway.example//")
            .with_timeout(5);

        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert_eq!(config.gateway_url, "https://my.gateway.example");
        assert_eq!(config.timeout_seconds, Some(5));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = PinataConfig::default().with_api_url("not a url");
        assert!(matches!(config.validate(), Err(PinningError::ConfigError(_))));

        let config = PinataConfig::default().with_gateway_url("ftp://gateway.example");
        assert!(matches!(config.validate(), Err(PinningError::ConfigError(_))));
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let json = r#"{"api_url":"https://api.example","gateway_url":"https://gw.example"}"#;
        let config: PinataConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.timeout_seconds, None);
        assert_eq!(config.gateway_url, "https://gw.example");
    }
}
