//! Widget configuration.
//!
//! [`AutoCompleteOptions`] is fixed once the widget is constructed. Options can
//! be built in code with the `with_*` setters or loaded from JSON/TOML using the
//! camelCase option names:
//!
//! ```
//! use horizon_autocomplete::options::AutoCompleteOptions;
//!
//! let options = AutoCompleteOptions::from_json_str(
//!     r#"{ "url": "/autocomplete.json", "minCharacters": 3 }"#,
//! ).unwrap();
//!
//! assert_eq!(options.min_characters, 3);
//! assert_eq!(options.fetch_delay_ms, 500);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default minimum query length before a fetch is issued.
pub const DEFAULT_MIN_CHARACTERS: usize = 2;
/// Default debounce window in milliseconds.
pub const DEFAULT_FETCH_DELAY_MS: u64 = 500;
/// Default grace delay between blur and close, in milliseconds.
pub const DEFAULT_BLUR_DELAY_MS: u64 = 150;

/// How query occurrences are located in candidate strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    /// Plain substring search.
    #[default]
    Literal,
    /// The query is compiled as a regular expression.
    ///
    /// Queries that fail to compile fall back to literal matching.
    Pattern,
}

/// Configuration for an [`AutoComplete`](crate::widget::AutoComplete).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoCompleteOptions {
    /// Minimum query length (in characters) before fetching.
    pub min_characters: usize,
    /// Debounce window in milliseconds.
    #[serde(rename = "fetchDelay")]
    pub fetch_delay_ms: u64,
    /// Base class toggled on the input while suggestions are shown.
    pub input_class_name: String,
    /// Base class for the dropdown container and its derived classes.
    pub auto_complete_base_class: String,
    /// Suggestion endpoint base path. Required.
    pub url: Option<String>,
    /// Grace delay between blur and close, in milliseconds.
    #[serde(rename = "blurDelay")]
    pub blur_delay_ms: u64,
    /// Query highlighting mode.
    pub highlight_mode: HighlightMode,
}

impl Default for AutoCompleteOptions {
    fn default() -> Self {
        Self {
            min_characters: DEFAULT_MIN_CHARACTERS,
            fetch_delay_ms: DEFAULT_FETCH_DELAY_MS,
            input_class_name: "input".to_string(),
            auto_complete_base_class: "autocomplete".to_string(),
            url: None,
            blur_delay_ms: DEFAULT_BLUR_DELAY_MS,
            highlight_mode: HighlightMode::Literal,
        }
    }
}

impl AutoCompleteOptions {
    /// Create options for the given endpoint with every other setting at its default.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Parse options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Set the endpoint URL using builder pattern.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the minimum query length using builder pattern.
    pub fn with_min_characters(mut self, count: usize) -> Self {
        self.min_characters = count;
        self
    }

    /// Set the debounce window using builder pattern.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay_ms = saturating_millis(delay);
        self
    }

    /// Set the input base class using builder pattern.
    pub fn with_input_class_name(mut self, class: impl Into<String>) -> Self {
        self.input_class_name = class.into();
        self
    }

    /// Set the dropdown base class using builder pattern.
    pub fn with_base_class(mut self, class: impl Into<String>) -> Self {
        self.auto_complete_base_class = class.into();
        self
    }

    /// Set the blur grace delay using builder pattern.
    pub fn with_blur_delay(mut self, delay: Duration) -> Self {
        self.blur_delay_ms = saturating_millis(delay);
        self
    }

    /// Set the highlight mode using builder pattern.
    pub fn with_highlight_mode(mut self, mode: HighlightMode) -> Self {
        self.highlight_mode = mode;
        self
    }

    /// The debounce window.
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    /// The blur grace delay.
    pub fn blur_delay(&self) -> Duration {
        Duration::from_millis(self.blur_delay_ms)
    }

    /// Check the options and return the endpoint URL.
    ///
    /// An absent or empty `url` is rejected.
    pub fn validate(&self) -> Result<&str, ConfigError> {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ConfigError::MissingUrl),
        }
    }

    /// Class names derived from this configuration.
    pub fn class_names(&self) -> ClassNames {
        ClassNames::new(&self.auto_complete_base_class, &self.input_class_name)
    }
}

/// Class names used in generated markup and on the input element.
///
/// Every name is derived from the two configured base classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    /// Dropdown container: `<base>`.
    pub container: String,
    /// Container modifier while the dropdown is shown: `<base>--visible`.
    pub visible: String,
    /// The `<ul>`: `<base>__list`.
    pub list: String,
    /// Each `<li>`: `<base>__item`.
    pub item: String,
    /// The selected `<li>`: `<base>__item--selected`.
    pub selected: String,
    /// Query occurrences: `<base>__highlight`.
    pub highlight: String,
    /// Input modifier while suggesting: `<input>--autocompleting`.
    pub input_active: String,
}

impl ClassNames {
    /// Derive class names from the dropdown and input base classes.
    pub fn new(base: &str, input_class: &str) -> Self {
        Self {
            container: base.to_string(),
            visible: format!("{base}--visible"),
            list: format!("{base}__list"),
            item: format!("{base}__item"),
            selected: format!("{base}__item--selected"),
            highlight: format!("{base}__highlight"),
            input_active: format!("{input_class}--autocompleting"),
        }
    }
}

/// Whole milliseconds in `delay`, clamped to `u64::MAX`.
fn saturating_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
