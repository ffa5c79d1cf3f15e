//! Suggestion sources.
//!
//! A [`SuggestionSource`] answers suggestion queries on behalf of the widget.
//! Requests are fire-and-forget: the source receives a [`ReplySender`] and
//! delivers the outcome whenever it is ready, from any thread. The widget's
//! driver drains the matching [`ReplyChannel`] on its own thread, so widget
//! state is never touched concurrently.
//!
//! Every request carries a sequence number assigned by the widget. Replies keep
//! that number, which lets the widget discard answers to superseded requests.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::error::{CoreError, Result};

/// A request for suggestions matching a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Monotonic sequence number assigned by the widget.
    pub sequence: u64,
    /// The raw text the user typed.
    pub query: String,
    /// The endpoint URL with the query already substituted.
    pub url: String,
}

impl SuggestionRequest {
    /// Create a new request.
    pub fn new(sequence: u64, query: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            sequence,
            query: query.into(),
            url: url.into(),
        }
    }
}

/// A failed suggestion fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    /// HTTP status, if the endpoint answered with a non-success status.
    pub status: Option<u16>,
    /// Diagnostic message.
    pub message: String,
}

impl FetchError {
    /// A failure that never produced an HTTP status (transport, parse, ...).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// A failure caused by a non-success HTTP status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {status}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for FetchError {}

/// The outcome of a suggestion fetch.
pub type FetchOutcome = std::result::Result<Vec<String>, FetchError>;

/// A completed suggestion fetch, tagged with its request's sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionResponse {
    /// Sequence number of the originating request.
    pub sequence: u64,
    /// Candidate strings or the failure.
    pub outcome: FetchOutcome,
}

/// Sending half handed to a [`SuggestionSource`] for a single request.
///
/// Consumed by [`send`](Self::send), so each request is answered at most once.
#[derive(Debug)]
pub struct ReplySender {
    sequence: u64,
    tx: Sender<SuggestionResponse>,
}

impl ReplySender {
    /// Sequence number of the request this sender answers.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Deliver the outcome.
    ///
    /// Fails if the widget (and its channel) has been dropped in the meantime.
    pub fn send(self, outcome: FetchOutcome) -> Result<()> {
        let sequence = self.sequence;
        self.tx
            .send(SuggestionResponse { sequence, outcome })
            .map_err(|_| CoreError::ReplyChannelClosed { sequence })
    }
}

/// Receiving side for suggestion replies.
#[derive(Debug)]
pub struct ReplyChannel {
    tx: Sender<SuggestionResponse>,
    rx: Receiver<SuggestionResponse>,
}

impl ReplyChannel {
    /// Create a new unbounded reply channel.
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Create a reply sender for the request with the given sequence number.
    pub fn sender(&self, sequence: u64) -> ReplySender {
        ReplySender {
            sequence,
            tx: self.tx.clone(),
        }
    }

    /// Take a reply if one is ready.
    pub fn try_recv(&self) -> Option<SuggestionResponse> {
        match self.rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block for up to `timeout` waiting for a reply.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SuggestionResponse> {
        match self.rx.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Number of replies waiting to be drained.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Default for ReplyChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for answering suggestion queries.
///
/// Implement this trait to feed the widget from a custom backend. The
/// implementation must eventually call [`ReplySender::send`] (or drop the
/// sender, which the widget treats as a request that never completes).
pub trait SuggestionSource: Send + Sync {
    /// Start fetching suggestions for `request`.
    fn fetch(&self, request: SuggestionRequest, reply: ReplySender);
}

impl<T: SuggestionSource + ?Sized> SuggestionSource for Arc<T> {
    fn fetch(&self, request: SuggestionRequest, reply: ReplySender) {
        (**self).fetch(request, reply)
    }
}

impl<T: SuggestionSource + ?Sized> SuggestionSource for Box<T> {
    fn fetch(&self, request: SuggestionRequest, reply: ReplySender) {
        (**self).fetch(request, reply)
    }
}

/// A suggestion source backed by a synchronous closure.
///
/// The closure runs on the calling thread and the reply is delivered before
/// `fetch` returns.
pub struct FnSuggestionSource<F> {
    func: F,
}

impl<F> FnSuggestionSource<F>
where
    F: Fn(&SuggestionRequest) -> FetchOutcome + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> SuggestionSource for FnSuggestionSource<F>
where
    F: Fn(&SuggestionRequest) -> FetchOutcome + Send + Sync,
{
    fn fetch(&self, request: SuggestionRequest, reply: ReplySender) {
        let outcome = (self.func)(&request);
        if let Err(err) = reply.send(outcome) {
            tracing::debug!(target: "horizon_autocomplete_core::source", "dropping reply: {}", err);
        }
    }
}

impl<F> fmt::Debug for FnSuggestionSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSuggestionSource").finish_non_exhaustive()
    }
}
