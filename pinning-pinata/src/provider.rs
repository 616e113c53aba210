//! Pinata provider handle and liveness check.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, instrument};

use pinning_core::error::{PinningError, Result};

use crate::config::PinataConfig;
use crate::decode::from_payload;
use crate::gateway::GatewayResolver;
use crate::records::AuthResponse;

/// Greeting returned by the authentication test endpoint for valid credentials.
pub const AUTH_GREETING: &str = "Congratulations! You are communicating with the Pinata API!";

const TEST_AUTH_PATH: &str = "/data/testAuthentication";

/// Pinata implementation of [`Provider`](pinning_core::Provider).
///
/// A handle only exists once the credentials have passed a live authentication
/// check. It holds no mutable state and can be reused for any number of calls.
pub struct PinataProvider {
    pub(crate) api_key: String,
    pub(crate) api_secret: String,
    pub(crate) config: PinataConfig,
    pub(crate) gateway: GatewayResolver,
    pub(crate) http_client: reqwest::Client,
}

impl PinataProvider {
    /// Connects to the public Pinata API with the given credentials.
    pub async fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, api_secret, PinataConfig::default()).await
    }

    /// Connects using custom endpoints.
    ///
    /// Fails with [`PinningError::Authentication`] if the service rejects the
    /// credentials or does not answer with the expected greeting.
    #[instrument(skip_all, fields(api_url = %config.api_url))]
    pub async fn with_config(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        config: PinataConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http_client = builder
            .build()
            .map_err(|e| PinningError::ConfigError(format!("failed to create HTTP client: {}", e)))?;

        let provider = Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            gateway: GatewayResolver::new(&config.gateway_url),
            config,
            http_client,
        };

        if !provider.ping().await? {
            return Err(PinningError::Authentication("service unavailable".into()));
        }

        info!("Connected to Pinata");
        Ok(provider)
    }

    /// Checks that the service is reachable and accepts the credentials.
    ///
    /// Returns `Ok(false)` if the service answers with an unexpected message.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<bool> {
        let payload = match self.get(&self.endpoint(TEST_AUTH_PATH)).await {
            Ok(payload) => payload,
            Err(PinningError::Api(message)) => return Err(PinningError::Authentication(message)),
            Err(e) => return Err(e),
        };

        let response: AuthResponse = from_payload(payload)?;
        match response.message {
            Some(message) => {
                debug!(%message, "Authentication check answered");
                Ok(message == AUTH_GREETING)
            }
            None => Err(PinningError::Authentication("unexpected failure".into())),
        }
    }

    /// Endpoint configuration in use.
    pub fn config(&self) -> &PinataConfig {
        &self.config
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }
}

impl fmt::Debug for PinataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinataProvider")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) const API_KEY: &str = "test-key";
    pub(crate) const API_SECRET: &str = "test-secret";

    pub(crate) async fn mount_auth(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(TEST_AUTH_PATH))
            .and(header("pinata_api_key", API_KEY))
            .and(header("pinata_secret_api_key", API_SECRET))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": AUTH_GREETING })))
            .mount(server)
            .await;
    }

    /// Provider connected to `server`, with the auth check already mocked.
    pub(crate) async fn connected(server: &MockServer) -> PinataProvider {
        mount_auth(server).await;
        PinataProvider::with_config(API_KEY, API_SECRET, test_config(server))
            .await
            .unwrap()
    }

    pub(crate) fn test_config(server: &MockServer) -> PinataConfig {
        PinataConfig::default().with_api_url(server.uri())
    }

    #[tokio::test]
    async fn test_connect_with_valid_credentials() {
        let server = MockServer::start().await;
        let provider = connected(&server).await;
        assert!(provider.ping().await.unwrap());
    }

    #[tokio::test]
    async fn test_connect_with_rejected_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TEST_AUTH_PATH))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": "Invalid API key / secret key combo" })),
            )
            .mount(&server)
            .await;

        for (key, secret) in [("", API_SECRET), (API_KEY, ""), ("", ""), (API_KEY, "wrong")] {
            let err = PinataProvider::with_config(key, secret, test_config(&server))
                .await
                .unwrap_err();
            assert!(matches!(err, PinningError::Authentication(_)), "{err:?}");
            assert_eq!(err.to_string(), "Invalid API key / secret key combo");
        }
    }

    #[tokio::test]
    async fn test_connect_with_unexpected_greeting() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TEST_AUTH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("Maintenance in progress"))
            .mount(&server)
            .await;

        let err = PinataProvider::with_config(API_KEY, API_SECRET, test_config(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, PinningError::Authentication(_)));
        assert_eq!(err.to_string(), "service unavailable");
    }

    #[tokio::test]
    async fn test_connect_without_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TEST_AUTH_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = PinataProvider::with_config(API_KEY, API_SECRET, test_config(&server))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unexpected failure");
    }

    #[tokio::test]
    async fn test_connect_with_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TEST_AUTH_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("{\"message\": "))
            .mount(&server)
            .await;

        let err = PinataProvider::with_config(API_KEY, API_SECRET, test_config(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, PinningError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_host() {
        // Nothing listens on port 9 (discard) in the test environment.
        let config = PinataConfig::default().with_api_url("http://127.0.0.1:9").with_timeout(5);
        let err = PinataProvider::with_config(API_KEY, API_SECRET, config)
            .await
            .unwrap_err();
        assert!(matches!(err, PinningError::HttpError(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected_before_connecting() {
        let config = PinataConfig::default().with_api_url("not a url");
        let err = PinataProvider::with_config(API_KEY, API_SECRET, config)
            .await
            .unwrap_err();
        assert!(matches!(err, PinningError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_debug_redacts_secret() {
        let server = MockServer::start().await;
        let provider = connected(&server).await;
        let debug = format!("{provider:?}");
        assert!(debug.contains(API_KEY));
        assert!(!debug.contains(API_SECRET));
    }
}
