//! Core systems for Horizon Autocomplete.
//!
//! This crate provides the foundational pieces the autocomplete widget is
//! built on:
//!
//! - **Signal/Slot System**: Type-safe notification of widget activity
//! - **Timers**: One-shot timers driven by an explicit clock (debounce, blur grace)
//! - **Suggestion Sources**: The seam between the widget and whatever answers
//!   suggestion queries (HTTP endpoint, static list, closure)
//! - **Logging**: Tracing targets and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_autocomplete_core::Signal;
//!
//! let activated = Signal::<String>::new();
//!
//! let conn_id = activated.connect(|value| {
//!     println!("Committed: {}", value);
//! });
//!
//! activated.emit("apple".to_string());
//! activated.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use horizon_autocomplete_core::TimerManager;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut timers = TimerManager::new();
//! let id = timers.start_one_shot_at(start, Duration::from_millis(500));
//!
//! assert!(timers.process_expired_at(start + Duration::from_millis(499)).is_empty());
//! assert_eq!(timers.process_expired_at(start + Duration::from_millis(500)), vec![id]);
//! ```
//!
//! # Suggestion Source Example
//!
//! ```
//! use horizon_autocomplete_core::{FnSuggestionSource, ReplyChannel, SuggestionRequest, SuggestionSource};
//!
//! let source = FnSuggestionSource::new(|request: &SuggestionRequest| {
//!     Ok(vec![format!("{}-suggestion", request.query)])
//! });
//!
//! let channel = ReplyChannel::new();
//! let request = SuggestionRequest::new(1, "ab", "/autocomplete.json");
//! source.fetch(request, channel.sender(1));
//!
//! let response = channel.try_recv().unwrap();
//! assert_eq!(response.outcome.unwrap(), vec!["ab-suggestion".to_string()]);
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod source;
mod timer;

pub use error::{CoreError, Result, TimerError};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use source::{
    FetchError, FetchOutcome, FnSuggestionSource, ReplyChannel, ReplySender, SuggestionRequest,
    SuggestionResponse, SuggestionSource,
};
pub use timer::{TimerId, TimerManager};
