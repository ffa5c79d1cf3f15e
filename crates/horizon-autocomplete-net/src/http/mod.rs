//! HTTP client for Horizon Autocomplete.
//!
//! Only what suggestion endpoints need: `GET` with headers, timeouts, a
//! cookie store and status checking.
//!
//! # Example
//!
//! ```ignore
//! use horizon_autocomplete_net::http::HttpClient;
//!
//! let client = HttpClient::new();
//!
//! let response = client
//!     .get("https://example.com/autocomplete.json?query=re")
//!     .header("Content-Type", "application/json")?
//!     .send()
//!     .await?
//!     .error_for_status()
//!     .await?;
//!
//! let items: Vec<String> = response.json().await?;
//! ```

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use request::HttpRequestBuilder;
pub use response::HttpResponse;
