//! The autocomplete state machine.

use std::time::Duration;

use horizon_autocomplete_core::{Signal, SuggestionRequest, SuggestionResponse, TimerId};

use super::highlight::Highlighter;
use super::render::{ListModel, RenderedItem};
use super::state::{Phase, WidgetState};
use crate::dom::{ClickTarget, Dom, DomEvent, ElementId, EventKind, Key};
use crate::error::{DomError, Result};
use crate::options::{AutoCompleteOptions, ClassNames};

/// Services the widget needs from whoever drives it.
///
/// [`AutoCompleteDriver`](crate::driver::AutoCompleteDriver) is the stock
/// implementation; hosts with their own event loop implement this trait
/// directly.
pub trait WidgetHost {
    /// The host document.
    fn dom(&mut self) -> &mut dyn Dom;

    /// Start a one-shot timer. The host later calls
    /// [`AutoComplete::handle_timer`] with the returned ID.
    fn start_timer(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer started with [`start_timer`](Self::start_timer).
    fn stop_timer(&mut self, id: TimerId);

    /// Issue a suggestion request. The host later calls
    /// [`AutoComplete::handle_response`] with the reply.
    fn fetch(&mut self, request: SuggestionRequest);
}

/// An autocomplete dropdown attached to a text input.
///
/// As the user types, the widget waits for a pause of `fetchDelay`, requests
/// suggestions for the input's value, and renders them into a results
/// container placed next to the input. Arrow keys move the selection, Enter
/// or a click on an item commits a value into the input.
///
/// # Signals
///
/// - `activated(String)`: Emitted when a value is committed (Enter or click)
/// - `highlighted(String)`: Emitted when the selected item changes
/// - `fetch_failed(String)`: Emitted when a suggestion request fails
pub struct AutoComplete {
    input: ElementId,
    container: ElementId,
    url: String,
    options: AutoCompleteOptions,
    classes: ClassNames,
    state: WidgetState,

    // Signals
    /// Signal emitted when a value is committed into the input.
    pub activated: Signal<String>,

    /// Signal emitted when the selected item changes.
    pub highlighted: Signal<String>,

    /// Signal emitted with a diagnostic message when a fetch fails.
    pub fetch_failed: Signal<String>,
}

impl AutoComplete {
    /// Attach a widget to `input`.
    ///
    /// Creates the results container as a sibling of the input, turns off
    /// native autocompletion and registers the event listeners. The options
    /// are validated before the document is touched.
    pub fn new(dom: &mut dyn Dom, input: ElementId, options: AutoCompleteOptions) -> Result<Self> {
        let url = options.validate()?.to_string();
        if !dom.exists(input) {
            return Err(DomError::UnknownElement(input).into());
        }
        let parent = dom.parent_of(input).ok_or(DomError::NoParent(input))?;
        let classes = options.class_names();

        let container = dom.create_element("div");
        dom.add_class(container, &classes.container)?;
        dom.append_child(parent, container)?;

        for kind in [
            EventKind::Input,
            EventKind::Click,
            EventKind::Blur,
            EventKind::Focus,
            EventKind::KeyUp,
        ] {
            dom.add_event_listener(input, kind)?;
        }
        dom.add_event_listener(container, EventKind::Click)?;
        dom.add_event_listener(container, EventKind::FocusOut)?;
        dom.set_attribute(input, "autocomplete", "off")?;

        tracing::debug!(target: "horizon_autocomplete::widget", ?input, ?container, url = %url, "autocomplete attached");

        Ok(Self {
            input,
            container,
            url,
            options,
            classes,
            state: WidgetState::default(),
            activated: Signal::new(),
            highlighted: Signal::new(),
            fetch_failed: Signal::new(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The input element.
    pub fn input(&self) -> ElementId {
        self.input
    }

    /// The results container.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The options the widget was built with.
    pub fn options(&self) -> &AutoCompleteOptions {
        &self.options
    }

    /// Class names in use.
    pub fn class_names(&self) -> &ClassNames {
        &self.classes
    }

    /// The last raw text entered.
    pub fn query(&self) -> &str {
        &self.state.query
    }

    /// Candidates from the most recent accepted fetch.
    pub fn items(&self) -> &[String] {
        &self.state.items
    }

    /// The highlighted candidates.
    pub fn rendered_items(&self) -> &[RenderedItem] {
        self.state.list.items()
    }

    /// The selected item index.
    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected
    }

    /// The selected item.
    pub fn selected_item(&self) -> Option<&str> {
        self.state
            .selected
            .and_then(|i| self.state.items.get(i))
            .map(String::as_str)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Whether the dropdown is visible.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Cached dropdown markup for the current items and selection.
    pub fn markup(&self) -> &str {
        &self.state.markup
    }

    /// Sequence number of the latest fetch cycle.
    pub fn sequence(&self) -> u64 {
        self.state.sequence
    }

    /// Whether a debounce timer is pending.
    pub fn has_pending_fetch(&self) -> bool {
        self.state.pending_fetch.is_some()
    }

    /// Whether a close after blur is pending.
    pub fn has_pending_close(&self) -> bool {
        self.state.pending_close.is_some()
    }

    /// The request URL for `query`: `<url>?query=<query>`, substituted literally.
    pub fn request_url(&self, query: &str) -> String {
        format!("{}?query={}", self.url, query)
    }

    /// Describe a click on the item at `index`, as a host would report it.
    pub fn item_click_target(&self, index: usize) -> Option<ClickTarget> {
        self.state
            .list
            .items()
            .get(index)
            .map(|item| item.click_target(&self.classes, self.state.selected == Some(index)))
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Handle an event from the host document.
    #[tracing::instrument(skip(self, host), target = "horizon_autocomplete::widget", level = "debug")]
    pub fn handle_event(&mut self, host: &mut dyn WidgetHost, event: DomEvent) -> Result<()> {
        match event {
            DomEvent::Input { value } => self.on_input(host, value),
            DomEvent::Click | DomEvent::Focus => self.on_focus(host),
            DomEvent::Blur { related } => self.on_blur(host, related),
            DomEvent::KeyUp(key) => self.on_key_up(host, key),
            DomEvent::ContainerClick(target) => self.on_container_click(host, target),
            DomEvent::ContainerFocusOut { related } => self.on_container_focus_out(host, related),
        }
    }

    /// Handle an expired timer.
    ///
    /// Returns `false` if the timer does not belong to this widget.
    pub fn handle_timer(&mut self, host: &mut dyn WidgetHost, id: TimerId) -> Result<bool> {
        if self.state.pending_fetch == Some(id) {
            self.state.pending_fetch = None;
            self.fetch_items(host)?;
            Ok(true)
        } else if self.state.pending_close == Some(id) {
            self.state.pending_close = None;
            self.close(host)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Apply a suggestion reply.
    ///
    /// Replies to anything but the latest fetch are discarded and `false` is
    /// returned. Failures are logged and treated as zero results; they are
    /// never returned as errors.
    pub fn handle_response(
        &mut self,
        host: &mut dyn WidgetHost,
        response: SuggestionResponse,
    ) -> Result<bool> {
        if response.sequence != self.state.sequence {
            tracing::debug!(
                target: "horizon_autocomplete::widget",
                sequence = response.sequence,
                latest = self.state.sequence,
                "discarding stale suggestion reply"
            );
            return Ok(false);
        }

        match response.outcome {
            Ok(items) if !items.is_empty() => self.accept(host, items)?,
            Ok(_) => {
                tracing::debug!(target: "horizon_autocomplete::widget", query = %self.state.requested, "no suggestions");
                self.no_results(host)?;
            }
            Err(err) => {
                tracing::error!(
                    target: "horizon_autocomplete::fetch",
                    sequence = response.sequence,
                    query = %self.state.requested,
                    status = ?err.status,
                    "suggestion fetch failed: {}",
                    err
                );
                self.no_results(host)?;
                self.fetch_failed.emit(err.to_string());
            }
        }
        Ok(true)
    }

    fn on_input(&mut self, host: &mut dyn WidgetHost, value: String) -> Result<()> {
        if let Some(id) = self.state.pending_fetch.take() {
            host.stop_timer(id);
        }
        self.state.query = value;
        self.state.pending_fetch = Some(host.start_timer(self.options.fetch_delay()));
        Ok(())
    }

    fn on_focus(&mut self, host: &mut dyn WidgetHost) -> Result<()> {
        self.state.focus_in_results = false;
        self.cancel_pending_close(host);
        if !self.state.items.is_empty() && !self.is_open() {
            self.open(host)?;
        }
        Ok(())
    }

    fn on_blur(&mut self, host: &mut dyn WidgetHost, related: Option<ElementId>) -> Result<()> {
        let container = self.container;
        if related.is_some_and(|r| host.dom().contains(container, r)) {
            // The results now own focus; a click or focusout there settles it.
            tracing::trace!(target: "horizon_autocomplete::widget", "focus moved into results, not closing");
            self.cancel_pending_close(host);
            self.state.focus_in_results = true;
            return Ok(());
        }

        self.cancel_pending_close(host);
        self.state.pending_close = Some(host.start_timer(self.options.blur_delay()));
        Ok(())
    }

    fn on_key_up(&mut self, host: &mut dyn WidgetHost, key: Key) -> Result<()> {
        match key {
            Key::ArrowUp | Key::ArrowDown => {
                if !self.is_open() && !self.state.items.is_empty() {
                    self.open(host)?;
                }
                if self.is_open() && self.state.step_selection(key == Key::ArrowDown) {
                    self.refresh_markup();
                    self.render(host.dom(), &self.state.markup)?;
                    if let Some(item) = self.selected_item() {
                        self.highlighted.emit(item.to_string());
                    }
                }
                Ok(())
            }
            Key::Enter if self.is_open() => match self.selected_item() {
                Some(item) => {
                    let value = item.to_string();
                    self.commit(host, value)
                }
                None => {
                    tracing::debug!(target: "horizon_autocomplete::widget", "enter with no selection, ignoring");
                    Ok(())
                }
            },
            Key::Enter | Key::Other(_) => Ok(()),
        }
    }

    fn on_container_click(&mut self, host: &mut dyn WidgetHost, target: ClickTarget) -> Result<()> {
        if !target.has_class(&self.classes.item) {
            if self.state.focus_in_results && self.is_open() {
                tracing::debug!(target: "horizon_autocomplete::widget", "click in results missed every item, closing");
                return self.close(host);
            }
            tracing::trace!(target: "horizon_autocomplete::widget", "click outside list items, ignoring");
            return Ok(());
        }
        match target.value {
            Some(value) => self.commit(host, value),
            None => {
                tracing::debug!(target: "horizon_autocomplete::widget", "clicked item has no value, ignoring");
                Ok(())
            }
        }
    }

    fn on_container_focus_out(
        &mut self,
        host: &mut dyn WidgetHost,
        related: Option<ElementId>,
    ) -> Result<()> {
        if !self.state.focus_in_results {
            return Ok(());
        }
        let (input, container) = (self.input, self.container);
        let dom = host.dom();
        if related.is_some_and(|r| r == input || dom.contains(container, r)) {
            return Ok(());
        }
        tracing::debug!(target: "horizon_autocomplete::widget", "focus left results, closing");
        self.close(host)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn fetch_items(&mut self, host: &mut dyn WidgetHost) -> Result<()> {
        let sequence = self.state.next_sequence();
        self.state.requested = self.state.query.clone();

        if self.state.requested.chars().count() < self.options.min_characters {
            tracing::debug!(
                target: "horizon_autocomplete::widget",
                query = %self.state.requested,
                min_characters = self.options.min_characters,
                "query too short, not fetching"
            );
            return self.no_results(host);
        }

        let url = self.request_url(&self.state.requested);
        tracing::debug!(target: "horizon_autocomplete::widget", sequence, url = %url, "requesting suggestions");
        host.fetch(SuggestionRequest::new(
            sequence,
            self.state.requested.clone(),
            url,
        ));
        Ok(())
    }

    fn accept(&mut self, host: &mut dyn WidgetHost, items: Vec<String>) -> Result<()> {
        let highlighter = Highlighter::new(&self.state.requested, self.options.highlight_mode);
        let list = ListModel::build(&items, &highlighter);
        tracing::debug!(target: "horizon_autocomplete::widget", count = items.len(), "suggestions received");

        self.state.set_results(items, list);
        self.refresh_markup();
        self.state.phase = Phase::Open;

        let dom = host.dom();
        dom.add_class(self.input, &self.classes.input_active)?;
        self.render(dom, &self.state.markup)
    }

    fn no_results(&mut self, host: &mut dyn WidgetHost) -> Result<()> {
        self.state.clear_results();
        let dom = host.dom();
        dom.remove_class(self.input, &self.classes.input_active)?;
        self.render(dom, "")
    }

    fn open(&mut self, host: &mut dyn WidgetHost) -> Result<()> {
        self.state.phase = Phase::Open;
        let dom = host.dom();
        self.render(dom, &self.state.markup)?;
        dom.add_class(self.input, &self.classes.input_active)?;
        Ok(())
    }

    fn close(&mut self, host: &mut dyn WidgetHost) -> Result<()> {
        self.cancel_pending_close(host);
        self.state.focus_in_results = false;
        self.state.phase = Phase::Closed;
        if self.state.selected.take().is_some() {
            self.refresh_markup();
        }

        let dom = host.dom();
        self.render(dom, "")?;
        dom.remove_class(self.input, &self.classes.input_active)?;
        Ok(())
    }

    fn commit(&mut self, host: &mut dyn WidgetHost, value: String) -> Result<()> {
        tracing::debug!(target: "horizon_autocomplete::widget", value = %value, "committing value");
        host.dom().set_value(self.input, &value)?;
        self.close(host)?;
        self.activated.emit(value);
        Ok(())
    }

    fn cancel_pending_close(&mut self, host: &mut dyn WidgetHost) {
        if let Some(id) = self.state.pending_close.take() {
            host.stop_timer(id);
        }
    }

    fn refresh_markup(&mut self) {
        self.state.markup = self.state.list.to_html(&self.classes, self.state.selected);
    }

    fn render(&self, dom: &mut dyn Dom, html: &str) -> Result<()> {
        dom.set_inner_html(self.container, html)?;
        if html.is_empty() {
            dom.remove_class(self.container, &self.classes.visible)?;
        } else {
            dom.add_class(self.container, &self.classes.visible)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for AutoComplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoComplete")
            .field("input", &self.input)
            .field("container", &self.container)
            .field("url", &self.url)
            .field("phase", &self.state.phase)
            .field("items_count", &self.state.items.len())
            .field("selected_index", &self.state.selected)
            .finish()
    }
}
