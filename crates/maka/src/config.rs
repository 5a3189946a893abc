//! Configuration for the Microsoft Academic Knowledge client.

use std::time::Duration;

use anyhow::Context;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Academic Knowledge API.
    pub const BASE_URL: &str = "https://westus.api.cognitive.microsoft.com/academic/v1.0";

    /// Model queried when none is given.
    pub const MODEL: &str = "latest";

    /// Maximum number of results requested per page.
    pub const MAX_PAGE_RESULTS: u32 = 50;

    /// User agent sent with every request.
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:27.0) Gecko/20100101 Firefox/27.0";

    /// Header carrying the subscription key (`Ocp-Apim-Subscription-Key`).
    pub const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";

    /// Interpret timeout passed to the API, in milliseconds.
    pub const INTERPRET_TIMEOUT_MS: u32 = 1000;

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay before each request (1 req/s per worker).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(1);

    /// Number of concurrent workers used while harvesting citations.
    pub const WORKERS: usize = 2;

    /// Retries for transient failures.
    pub const MAX_RETRIES: u32 = 3;

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Environment variable holding the subscription key.
pub const SUBSCRIPTION_KEY_ENV: &str = "MAKA_SUBSCRIPTION_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "MAKA_BASE_URL";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Academic Knowledge subscription key.
    pub subscription_key: Option<String>,

    /// Base URL for the API (for testing with mock servers).
    pub base_url: String,

    /// User agent header value.
    pub user_agent: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay before each request.
    pub rate_limit_delay: Duration,

    /// Retries for transient failures.
    pub max_retries: u32,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a new configuration with an optional subscription key.
    #[must_use]
    pub fn new(subscription_key: Option<String>) -> Self {
        Self {
            subscription_key,
            base_url: api::BASE_URL.to_string(),
            user_agent: api::USER_AGENT.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
            max_retries: api::MAX_RETRIES,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            subscription_key: Some("test-key".to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: api::USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            max_retries: 0,
            cache_ttl: Duration::from_secs(0), // No caching in tests
            cache_max_size: 0,
        }
    }

    /// Create configuration from the environment.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    ///
    /// # Errors
    ///
    /// Returns error if `MAKA_BASE_URL` is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let subscription_key =
            std::env::var(SUBSCRIPTION_KEY_ENV).ok().filter(|key| !key.trim().is_empty());
        let config = Self::new(subscription_key);

        match std::env::var(BASE_URL_ENV) {
            Ok(base_url) => config.with_base_url(&base_url),
            Err(_) => Ok(config),
        }
    }

    /// Replace the base URL after validating it.
    ///
    /// # Errors
    ///
    /// Returns error if the URL does not parse or is not http(s).
    pub fn with_base_url(mut self, base_url: &str) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(base_url)
            .with_context(|| format!("invalid base URL: {base_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("base URL must be http or https: {base_url}");
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Replace the per-request delay.
    #[must_use]
    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    /// Check if a subscription key is configured.
    #[must_use]
    pub const fn has_subscription_key(&self) -> bool {
        self.subscription_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.subscription_key.is_none());
        assert!(!config.has_subscription_key());
        assert_eq!(config.base_url, api::BASE_URL);
    }

    #[test]
    fn test_config_with_key() {
        let config = Config::new(Some("test-key".to_string()));
        assert!(config.has_subscription_key());
        assert_eq!(config.subscription_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = Config::default().with_base_url("http://localhost:8080/academic/").unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/academic");
    }

    #[test]
    fn test_with_base_url_rejects_garbage() {
        assert!(Config::default().with_base_url("not a url").is_err());
        assert!(Config::default().with_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_for_testing_disables_delay() {
        let config = Config::for_testing("http://127.0.0.1:1234/");
        assert_eq!(config.base_url, "http://127.0.0.1:1234");
        assert_eq!(config.rate_limit_delay, Duration::ZERO);
        assert_eq!(config.max_retries, 0);
    }
}
