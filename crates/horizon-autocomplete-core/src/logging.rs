//! Logging facilities for Horizon Autocomplete.
//!
//! Horizon Autocomplete uses the `tracing` crate for instrumentation. To see
//! logs, install a subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter(EnvFilter::new("horizon_autocomplete=debug"))
//!         .init();
//! }
//! ```
//!
//! All crates log under the fixed targets in [`targets`], so a filter such as
//! `horizon_autocomplete::fetch=error` isolates failed suggestion requests.

/// Span names used throughout Horizon Autocomplete for tracing.
pub mod span_names {
    /// Widget event dispatch span.
    pub const DISPATCH: &str = "horizon_autocomplete::dispatch";
    /// Dropdown rendering span.
    pub const RENDER: &str = "horizon_autocomplete::render";
    /// Suggestion fetch span.
    pub const FETCH: &str = "horizon_autocomplete::fetch";
}

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_autocomplete_core";
    /// Timer system target.
    pub const TIMER: &str = "horizon_autocomplete_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_autocomplete_core::signal";
    /// Suggestion source target.
    pub const SOURCE: &str = "horizon_autocomplete_core::source";
    /// HTTP client target.
    pub const HTTP: &str = "horizon_autocomplete_net::http";
    /// Widget state machine target.
    pub const WIDGET: &str = "horizon_autocomplete::widget";
    /// Fetch outcome target (failed requests are logged here).
    pub const FETCH: &str = "horizon_autocomplete::fetch";
    /// Event driver target.
    pub const DRIVER: &str = "horizon_autocomplete::driver";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_autocomplete::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_without_subscriber() {
        // Must not panic when no subscriber is installed.
        let span = PerfSpan::new(span_names::RENDER);
        drop(span);
    }

    #[test]
    fn test_targets_share_prefix() {
        for target in [
            targets::TIMER,
            targets::SIGNAL,
            targets::SOURCE,
        ] {
            assert!(target.starts_with(targets::CORE));
        }
        assert!(targets::FETCH.starts_with("horizon_autocomplete::"));
    }
}
