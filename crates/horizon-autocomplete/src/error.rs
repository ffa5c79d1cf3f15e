//! Error types for the autocomplete widget.

use horizon_autocomplete_core::CoreError;

use crate::dom::ElementId;

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or driving the widget.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid widget configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The host document rejected an operation.
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    /// Core framework error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The suggestion endpoint URL is absent or empty.
    #[error("Autocomplete url is mandatory")]
    MissingUrl,

    /// Options could not be parsed from JSON.
    #[error("Invalid JSON options: {0}")]
    Json(String),

    /// Options could not be parsed from TOML.
    #[error("Invalid TOML options: {0}")]
    Toml(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err.to_string())
    }
}

/// Host document errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The element does not exist in the document.
    #[error("Unknown element {0:?}")]
    UnknownElement(ElementId),

    /// The element is not attached to a parent node.
    #[error("Element {0:?} has no parent node")]
    NoParent(ElementId),

    /// The requested insertion would make an element its own ancestor.
    #[error("Cannot append {child:?} to {parent:?}: hierarchy request error")]
    Hierarchy {
        /// The would-be parent.
        parent: ElementId,
        /// The element being appended.
        child: ElementId,
    },
}
