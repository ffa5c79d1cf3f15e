//! Suggestion endpoint access over HTTP.

use horizon_autocomplete_core::{FetchError, ReplySender, SuggestionRequest, SuggestionSource};
use tokio::runtime::Handle;
use url::Url;

use crate::error::{NetworkError, Result};
use crate::http::HttpClient;
use crate::runtime;

/// Fetch suggestions from a fully resolved endpoint URL.
///
/// Issues a `GET` with `Content-Type: application/json`. Non-success
/// statuses become [`NetworkError::HttpStatus`], carrying the body's
/// `response` property when present; a success body must be a JSON array of
/// strings.
pub async fn request_suggestions(client: &HttpClient, url: &str) -> Result<Vec<String>> {
    let response = client
        .get(url)
        .header("Content-Type", "application/json")?
        .send()
        .await?
        .error_for_status()
        .await?;

    response.json::<Vec<String>>().await
}

/// A [`SuggestionSource`] backed by an HTTP endpoint.
///
/// Requests are spawned on a tokio runtime (the crate's shared runtime unless
/// another handle is supplied) and answered through the request's
/// [`ReplySender`]. Relative endpoint URLs are resolved against the configured
/// origin, the way a browser resolves them against the current page.
#[derive(Debug, Clone)]
pub struct HttpSuggestionSource {
    client: HttpClient,
    origin: Option<Url>,
    runtime: Option<Handle>,
}

impl HttpSuggestionSource {
    /// Create a source using the given client.
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            origin: None,
            runtime: None,
        }
    }

    /// Resolve relative endpoint URLs against `origin`.
    pub fn with_origin(mut self, origin: impl AsRef<str>) -> Result<Self> {
        self.origin = Some(Url::parse(origin.as_ref())?);
        Ok(self)
    }

    /// Spawn requests on the given runtime instead of the shared one.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Get the underlying HTTP client.
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Resolve an endpoint URL, joining relative paths onto the origin.
    pub fn resolve_url(&self, url: &str) -> Result<String> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute.into()),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.origin {
                Some(origin) => Ok(origin.join(url)?.into()),
                None => Err(NetworkError::InvalidUrl(format!(
                    "relative URL '{url}' requires an origin"
                ))),
            },
            Err(err) => Err(err.into()),
        }
    }
}

impl SuggestionSource for HttpSuggestionSource {
    fn fetch(&self, request: SuggestionRequest, reply: ReplySender) {
        let client = self.client.clone();
        let resolved = self.resolve_url(&request.url);
        let sequence = request.sequence;

        let task = async move {
            let outcome = match resolved {
                Ok(url) => request_suggestions(&client, &url).await,
                Err(err) => Err(err),
            };
            if let Err(err) = reply.send(outcome.map_err(FetchError::from)) {
                tracing::debug!(target: "horizon_autocomplete_net::http", sequence, "dropping reply: {}", err);
            }
        };

        match &self.runtime {
            Some(handle) => {
                handle.spawn(task);
            }
            None => {
                runtime::spawn(task);
            }
        }
    }
}
