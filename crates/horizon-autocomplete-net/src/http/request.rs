//! Outgoing `GET` requests.

use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::client::HttpClient;
use super::response::HttpResponse;
use crate::error::Result;

/// A `GET` request being assembled.
///
/// The URL is sent as given: query strings are not re-encoded, matching how a
/// page's `fetch` treats a URL it was handed.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    client: HttpClient,
    url: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl HttpRequestBuilder {
    pub(crate) fn new(client: HttpClient, url: String) -> Self {
        Self {
            client,
            url,
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers set so far.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Set a header, replacing any earlier value.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::try_from(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Override the client's timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send the request.
    ///
    /// Any status is returned as a response; use
    /// [`HttpResponse::error_for_status`] to turn failures into errors.
    #[tracing::instrument(skip(self), fields(url = %self.url), target = "horizon_autocomplete_net::http", level = "debug")]
    pub async fn send(self) -> Result<HttpResponse> {
        let url = Url::parse(&self.url)?;
        let mut request = self
            .client
            .reqwest_client()
            .get(url)
            .headers(self.headers);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        tracing::debug!(target: "horizon_autocomplete_net::http", status = response.status().as_u16(), "response received");
        Ok(HttpResponse::from_reqwest(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn test_header_replaces_value() {
        let request = HttpClient::new()
            .get("http://example.com/autocomplete.json?query=re")
            .header("Content-Type", "text/plain")
            .unwrap()
            .header("content-type", "application/json")
            .unwrap();

        assert_eq!(request.url(), "http://example.com/autocomplete.json?query=re");
        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_invalid_header_is_an_error() {
        let result = HttpClient::new().get("http://example.com").header("bad name", "x");
        assert!(matches!(result, Err(NetworkError::InvalidHeader(_))));

        let result = HttpClient::new()
            .get("http://example.com")
            .header("X-Query", "line\nbreak");
        assert!(matches!(result, Err(NetworkError::InvalidHeader(_))));
    }
}
