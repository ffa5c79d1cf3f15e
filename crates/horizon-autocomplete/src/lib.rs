//! Horizon Autocomplete - a headless autocomplete widget.
//!
//! This is the umbrella crate that re-exports all public APIs.
//!
//! The widget attaches to a text input, fetches suggestions from an endpoint
//! as the user types (debounced), renders a dropdown with the query
//! highlighted in each candidate, and supports keyboard and mouse selection.
//! It is host-agnostic: the page is reached through the [`dom::Dom`] trait and
//! the endpoint through [`SuggestionSource`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use horizon_autocomplete::dom::{Dom, MemoryDocument};
//! use horizon_autocomplete::driver::AutoCompleteDriver;
//! use horizon_autocomplete::net::{HttpClient, HttpSuggestionSource};
//! use horizon_autocomplete::options::AutoCompleteOptions;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut doc = MemoryDocument::new();
//!     let input = doc.create_element("input");
//!     doc.append_child(doc.body(), input)?;
//!
//!     let source = HttpSuggestionSource::new(HttpClient::new())
//!         .with_origin("http://localhost:3000")?;
//!     let options = AutoCompleteOptions::new("/autocomplete.json");
//!     let mut driver = AutoCompleteDriver::new(doc, input, options, source)?;
//!
//!     driver.type_text("app")?;
//!     driver.advance(Duration::from_millis(500))?;
//!     driver.wait_for_replies(Duration::from_secs(5))?;
//!
//!     println!("{}", driver.widget().markup());
//!     Ok(())
//! }
//! ```

pub use horizon_autocomplete_core::*;

pub mod dom;
pub mod driver;
mod error;
pub mod options;
mod static_source;
pub mod widget;

pub use driver::AutoCompleteDriver;
pub use error::{ConfigError, DomError, Error, Result};
pub use options::{AutoCompleteOptions, ClassNames, HighlightMode};
pub use static_source::{CaseSensitivity, StaticSuggestionSource};
pub use widget::{AutoComplete, Phase, WidgetHost};

/// Networking module (HTTP suggestion source).
#[cfg(feature = "networking")]
pub mod net {
    pub use horizon_autocomplete_net::*;
}
