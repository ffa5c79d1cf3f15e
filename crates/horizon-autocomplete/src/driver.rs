//! A single-threaded event driver for one widget.
//!
//! [`AutoCompleteDriver`] owns the document, the widget, a [`TimerManager`]
//! and the [`ReplyChannel`] suggestion sources answer on. All widget state is
//! mutated on the thread that calls into the driver; sources may reply from
//! any thread.
//!
//! Time is explicit. [`advance`](AutoCompleteDriver::advance) moves the
//! driver's clock forward and fires the timers that fall due on the way, which
//! makes debounce and blur behaviour reproducible. An interactive host calls
//! `advance` with the real time elapsed between events.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use horizon_autocomplete::dom::{Dom, DomEvent, Key, MemoryDocument};
//! use horizon_autocomplete::driver::AutoCompleteDriver;
//! use horizon_autocomplete::options::AutoCompleteOptions;
//! use horizon_autocomplete::StaticSuggestionSource;
//!
//! let mut doc = MemoryDocument::new();
//! let input = doc.create_element("input");
//! doc.append_child(doc.body(), input).unwrap();
//!
//! let source = StaticSuggestionSource::from(vec!["apple", "application", "banana"]);
//! let mut driver =
//!     AutoCompleteDriver::new(doc, input, AutoCompleteOptions::new("/autocomplete.json"), source)
//!         .unwrap();
//!
//! driver.type_text("app").unwrap();
//! driver.advance(Duration::from_millis(500)).unwrap();
//! assert_eq!(driver.widget().items().len(), 2);
//!
//! driver.dispatch(DomEvent::KeyUp(Key::ArrowDown)).unwrap();
//! driver.dispatch(DomEvent::KeyUp(Key::Enter)).unwrap();
//! assert_eq!(driver.document().value(input).as_deref(), Some("apple"));
//! ```

use std::time::{Duration, Instant};

use horizon_autocomplete_core::{
    ReplyChannel, SuggestionRequest, SuggestionResponse, SuggestionSource, TimerId, TimerManager,
};

use crate::dom::{Dom, DomEvent, ElementId};
use crate::error::Result;
use crate::options::AutoCompleteOptions;
use crate::widget::{AutoComplete, WidgetHost};

/// Drives one [`AutoComplete`] against a document and a suggestion source.
pub struct AutoCompleteDriver<D: Dom> {
    document: D,
    widget: AutoComplete,
    timers: TimerManager,
    replies: ReplyChannel,
    source: Box<dyn SuggestionSource>,
    now: Instant,
}

/// The widget's view of the driver while an event is being handled.
struct Host<'a, D: Dom> {
    document: &'a mut D,
    timers: &'a mut TimerManager,
    replies: &'a ReplyChannel,
    source: &'a dyn SuggestionSource,
    now: Instant,
}

impl<D: Dom> WidgetHost for Host<'_, D> {
    fn dom(&mut self) -> &mut dyn Dom {
        &mut *self.document
    }

    fn start_timer(&mut self, delay: Duration) -> TimerId {
        self.timers.start_one_shot_at(self.now, delay)
    }

    fn stop_timer(&mut self, id: TimerId) {
        if let Err(err) = self.timers.stop(id) {
            tracing::trace!(target: "horizon_autocomplete::driver", ?id, "stop_timer: {}", err);
        }
    }

    fn fetch(&mut self, request: SuggestionRequest) {
        let reply = self.replies.sender(request.sequence);
        self.source.fetch(request, reply);
    }
}

impl<D: Dom> AutoCompleteDriver<D> {
    /// Attach a widget to `input` in `document` and take ownership of both.
    pub fn new(
        mut document: D,
        input: ElementId,
        options: AutoCompleteOptions,
        source: impl SuggestionSource + 'static,
    ) -> Result<Self> {
        let widget = AutoComplete::new(&mut document, input, options)?;
        Ok(Self {
            document,
            widget,
            timers: TimerManager::new(),
            replies: ReplyChannel::new(),
            source: Box::new(source),
            now: Instant::now(),
        })
    }

    /// The widget.
    pub fn widget(&self) -> &AutoComplete {
        &self.widget
    }

    /// The document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// The driver's current time.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Number of pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.active_count()
    }

    /// Deliver an event to the widget.
    ///
    /// Timers already due and replies already waiting are processed afterwards.
    pub fn dispatch(&mut self, event: DomEvent) -> Result<()> {
        tracing::trace!(target: "horizon_autocomplete::driver", kind = event.kind().as_str(), "dispatch");
        let (widget, mut host) = self.split();
        widget.handle_event(&mut host, event)?;
        self.fire_expired()?;
        self.pump()?;
        Ok(())
    }

    /// Set the input's value and deliver the matching `input` event.
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        let input = self.widget.input();
        self.document.set_value(input, text)?;
        self.dispatch(DomEvent::Input {
            value: text.to_string(),
        })
    }

    /// Move the clock forward by `duration`, firing timers as they fall due.
    ///
    /// Timers started by a firing timer are honoured if their deadline is
    /// still within the window.
    pub fn advance(&mut self, duration: Duration) -> Result<()> {
        let target = self.now + duration;
        while let Some(wait) = self.timers.time_until_next(self.now) {
            let deadline = self.now + wait;
            if deadline > target {
                break;
            }
            self.now = deadline;
            self.fire_expired()?;
        }
        self.now = target;
        self.pump()?;
        Ok(())
    }

    /// Apply every reply that has already arrived.
    ///
    /// Returns the number of replies drained, stale ones included.
    pub fn pump(&mut self) -> Result<usize> {
        let mut drained = 0;
        while let Some(response) = self.replies.try_recv() {
            self.apply(response)?;
            drained += 1;
        }
        Ok(drained)
    }

    /// Block until a reply arrives or `timeout` elapses, then apply every
    /// waiting reply.
    ///
    /// The driver's clock does not move while waiting.
    pub fn wait_for_replies(&mut self, timeout: Duration) -> Result<usize> {
        match self.replies.recv_timeout(timeout) {
            Some(response) => {
                self.apply(response)?;
                Ok(1 + self.pump()?)
            }
            None => {
                tracing::debug!(target: "horizon_autocomplete::driver", ?timeout, "no suggestion reply before timeout");
                Ok(0)
            }
        }
    }

    /// Time until the next pending timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.timers.time_until_next(self.now)
    }

    fn apply(&mut self, response: SuggestionResponse) -> Result<()> {
        let (widget, mut host) = self.split();
        widget.handle_response(&mut host, response)?;
        Ok(())
    }

    fn fire_expired(&mut self) -> Result<()> {
        for id in self.timers.process_expired_at(self.now) {
            let (widget, mut host) = self.split();
            if !widget.handle_timer(&mut host, id)? {
                tracing::trace!(target: "horizon_autocomplete::driver", ?id, "timer not claimed by widget");
            }
            self.pump()?;
        }
        Ok(())
    }

    fn split(&mut self) -> (&mut AutoComplete, Host<'_, D>) {
        let host = Host {
            document: &mut self.document,
            timers: &mut self.timers,
            replies: &self.replies,
            source: self.source.as_ref(),
            now: self.now,
        };
        (&mut self.widget, host)
    }
}

impl<D: Dom> std::fmt::Debug for AutoCompleteDriver<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoCompleteDriver")
            .field("widget", &self.widget)
            .field("pending_timers", &self.timers.active_count())
            .field("pending_replies", &self.replies.pending())
            .finish_non_exhaustive()
    }
}
