//! Networking module for Horizon Autocomplete.
//!
//! This crate talks to the suggestion endpoint on behalf of the widget:
//!
//! - **HTTP Client**: A small reqwest-backed client for `GET` requests
//! - **Suggestion Source**: [`HttpSuggestionSource`] implements
//!   [`SuggestionSource`](horizon_autocomplete_core::SuggestionSource) by
//!   issuing `GET <url>?query=<text>` and parsing a JSON array of strings
//! - **Runtime**: A shared tokio runtime the requests are spawned on
//!
//! # HTTP Client
//!
//! ```ignore
//! use horizon_autocomplete_net::http::HttpClient;
//!
//! let client = HttpClient::new();
//!
//! let response = client.get("https://example.com/autocomplete.json?query=app")
//!     .header("Content-Type", "application/json")?
//!     .send()
//!     .await?;
//!
//! let items: Vec<String> = response.json().await?;
//! ```
//!
//! ## Configuration
//!
//! ```ignore
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(5))
//!     .user_agent("MyApp/1.0")
//!     .build()?;
//! ```
//!
//! # Suggestion Source
//!
//! ```ignore
//! use horizon_autocomplete_net::HttpSuggestionSource;
//!
//! // Relative endpoint paths such as "/autocomplete.json" are resolved
//! // against the origin, the way a browser resolves them against the page.
//! let source = HttpSuggestionSource::new(HttpClient::new())
//!     .with_origin("http://localhost:3000")?;
//! ```

mod error;
pub mod http;
pub mod runtime;
mod suggest;

pub use error::{NetworkError, Result};

pub use http::{HttpClient, HttpClientBuilder, HttpClientConfig, HttpRequestBuilder, HttpResponse};
pub use suggest::{HttpSuggestionSource, request_suggestions};
