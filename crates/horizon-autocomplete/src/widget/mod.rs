//! The autocomplete widget.
//!
//! [`AutoComplete`] is a state machine over [`Phase::Closed`] and
//! [`Phase::Open`]. It reacts to [`DomEvent`](crate::dom::DomEvent)s, timer
//! expiries and suggestion replies, and asks its [`WidgetHost`] for timers,
//! fetches and document access.

mod autocomplete;
pub mod highlight;
pub mod render;
mod state;

pub use autocomplete::{AutoComplete, WidgetHost};
pub use highlight::{Highlighter, Segment};
pub use render::{ListModel, RenderedItem, VALUE_ATTRIBUTE, escape_html};
pub use state::Phase;
