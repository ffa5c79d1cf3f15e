//! The shared HTTP client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;

use super::request::HttpRequestBuilder;
use crate::error::Result;

/// Settings for the suggestion HTTP client.
///
/// Suggestion requests are made with same-origin credentials, so the cookie
/// store is on by default and cookies set by the origin are replayed on every
/// request.
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Whole-request timeout.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Redirects followed before giving up.
    pub max_redirects: usize,
    /// Whether cookies are kept and replayed.
    pub cookies_enabled: bool,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            max_redirects: 10,
            cookies_enabled: true,
            user_agent: Some(format!(
                "HorizonAutocomplete/{} (Rust)",
                env!("CARGO_PKG_VERSION")
            )),
        }
    }
}

/// Builder for an [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Start from the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Wait indefinitely for responses.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum number of redirects to follow. Zero disables them.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Do not keep cookies between requests.
    pub fn no_cookies(mut self) -> Self {
        self.config.cookies_enabled = false;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpClient> {
        let config = self.config;
        let redirects = match config.max_redirects {
            0 => Policy::none(),
            max => Policy::limited(max),
        };

        let mut builder = reqwest::Client::builder()
            .redirect(redirects)
            .cookie_store(config.cookies_enabled);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(ua) = &config.user_agent {
            builder = builder.user_agent(ua);
        }

        let client = builder.build()?;
        tracing::debug!(target: "horizon_autocomplete_net::http", ?config, "http client built");

        Ok(HttpClient {
            inner: Arc::new(HttpClientInner { client, config }),
        })
    }
}

struct HttpClientInner {
    client: reqwest::Client,
    config: HttpClientConfig,
}

/// HTTP client used to reach suggestion endpoints.
///
/// Clones share one connection pool and one cookie store, so every
/// [`HttpSuggestionSource`](crate::HttpSuggestionSource) built from the same
/// client sees the same session.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a client with the default settings.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized. Use
    /// [`HttpClient::builder`] to handle that case as an error.
    pub fn new() -> Self {
        HttpClientBuilder::new()
            .build()
            .expect("Failed to create HTTP client with default configuration")
    }

    /// Configure a client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// The settings the client was built with.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// Start a `GET` request.
    pub fn get(&self, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(self.clone(), url.into())
    }

    pub(crate) fn reqwest_client(&self) -> &reqwest::Client {
        &self.inner.client
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
