//! Responses from suggestion endpoints.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{NetworkError, Result};

/// Error body shape some endpoints use: `{ "response": ... }`.
#[derive(Deserialize)]
struct ErrorBody {
    response: serde_json::Value,
}

/// A response to an [`HttpRequestBuilder`](super::HttpRequestBuilder).
pub struct HttpResponse {
    inner: reqwest::Response,
}

impl HttpResponse {
    /// Create from a reqwest response.
    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        Self { inner: response }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get the final URL after redirects.
    pub fn url(&self) -> &str {
        self.inner.url().as_str()
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        Ok(self.inner.text().await?)
    }

    /// Parse the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let text = self.inner.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Pass successful responses through; turn any other status into
    /// [`NetworkError::HttpStatus`].
    ///
    /// The error body is read for a diagnostic message: the `response`
    /// property of a JSON object if there is one, otherwise the raw text.
    pub async fn error_for_status(self) -> Result<Self> {
        let status = self.status();
        if self.is_success() {
            return Ok(self);
        }

        let body = self.text().await.ok();
        let message = body.and_then(|text| error_message(&text));
        Err(NetworkError::HttpStatus { status, message })
    }
}

/// Extract a diagnostic message from an error response body.
fn error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return match parsed.response {
            serde_json::Value::Null => None,
            serde_json::Value::String(msg) => Some(msg),
            other => Some(other.to_string()),
        };
    }

    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status())
            .field("url", &self.url())
            .finish()
    }
}
