//! Mutable widget state.

use horizon_autocomplete_core::TimerId;

use super::render::ListModel;

/// Whether the dropdown is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The dropdown is hidden.
    #[default]
    Closed,
    /// The dropdown is visible.
    Open,
}

/// State owned by one widget instance.
///
/// `selected` is always `None` or a valid index into `items`, and the phase is
/// [`Phase::Closed`] whenever `items` is empty.
#[derive(Debug, Default)]
pub(crate) struct WidgetState {
    /// Last raw text entered by the user.
    pub query: String,
    /// Query of the latest issued fetch.
    pub requested: String,
    /// Candidates from the most recent accepted fetch.
    pub items: Vec<String>,
    /// Highlighted candidates for `items`/`requested`.
    pub list: ListModel,
    /// Markup for `list` at the current selection.
    pub markup: String,
    /// Selected item index.
    pub selected: Option<usize>,
    pub phase: Phase,
    /// Pending debounce timer.
    pub pending_fetch: Option<TimerId>,
    /// Pending close after blur.
    pub pending_close: Option<TimerId>,
    /// Focus left the input for an element inside the results container.
    pub focus_in_results: bool,
    /// Sequence number of the latest fetch cycle.
    pub sequence: u64,
}

impl WidgetState {
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Replace the result set, clearing the selection.
    pub fn set_results(&mut self, items: Vec<String>, list: ListModel) {
        self.items = items;
        self.list = list;
        self.selected = None;
    }

    /// Drop the result set.
    pub fn clear_results(&mut self) {
        self.items.clear();
        self.list = ListModel::default();
        self.markup.clear();
        self.selected = None;
        self.phase = Phase::Closed;
    }

    /// Move the selection one step, clamped to the item range.
    ///
    /// Moving up from no selection selects the first item. Returns `true` if
    /// the selection changed.
    pub fn step_selection(&mut self, down: bool) -> bool {
        let Some(last) = self.items.len().checked_sub(1) else {
            return false;
        };
        let next = match (self.selected, down) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(last),
            (Some(i), false) => i.saturating_sub(1),
        };
        let changed = self.selected != Some(next);
        self.selected = Some(next);
        changed
    }

    /// Start a new fetch cycle and return its sequence number.
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}
