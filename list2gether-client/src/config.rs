//! Client configuration.

use crate::error::{ClientError, ClientResult};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "LIST2GETHER_API_BASE_URL";

/// Environment variable holding an optional transport timeout, in seconds.
pub const TIMEOUT_ENV: &str = "LIST2GETHER_HTTP_TIMEOUT_SECS";

/// Configuration for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    /// Transport timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    /// Custom `User-Agent` header.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables.
    ///
    /// Looks for:
    /// - `LIST2GETHER_API_BASE_URL` (blank or missing falls back to the default)
    /// - `LIST2GETHER_HTTP_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(url);
        }
        config.timeout = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        config
    }

    /// Set the base URL. Blank values fall back to the default; trailing slashes are stripped.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&url.into());
        self
    }

    /// Set the transport timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Normalized base URL (never ends in `/`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL and a path with exactly one slash between them.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::Config(format!(
                "Unsupported base URL scheme: {}",
                other
            ))),
        }
    }

    /// Build an HTTP client with this config.
    pub fn build_http_client(&self) -> ClientResult<Client> {
        let mut builder = Client::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_BASE_URL.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://api.test", "/api/lists")]
    #[case("http://api.test/", "/api/lists")]
    #[case("http://api.test", "api/lists")]
    #[case("http://api.test/", "api/lists")]
    #[case("http://api.test//", "//api/lists")]
    fn test_url_for_single_slash(#[case] base: &str, #[case] path: &str) {
        let config = ClientConfig::new().with_base_url(base);
        assert_eq!(config.url_for(path), "http://api.test/api/lists");
    }

    #[test]
    fn test_url_for_keeps_query() {
        let config = ClientConfig::new().with_base_url("https://l2g.example/v1/");
        assert_eq!(
            config.url_for("api/search/media?q=alien"),
            "https://l2g.example/v1/api/search/media?q=alien"
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_base_url_uses_default(#[case] raw: &str) {
        let config = ClientConfig::new().with_base_url(raw);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(BASE_URL_ENV, "https://env.example/");
        std::env::set_var(TIMEOUT_ENV, "15");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url(), "https://env.example");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));

        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::new().validate().is_ok());
        assert!(ClientConfig::new().with_base_url("ftp://x").validate().is_err());
        assert!(ClientConfig::new().with_base_url("not a url").validate().is_err());
    }

    #[test]
    fn test_build_client() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(10))
            .with_user_agent("list2gether-test");
        assert!(config.build_http_client().is_ok());
    }
}
