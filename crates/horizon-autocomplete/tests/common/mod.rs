//! Shared fixtures for widget integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::Arc;

use horizon_autocomplete::dom::{Dom, ElementId, MemoryDocument};
use horizon_autocomplete::{
    AutoCompleteOptions, FetchError, FetchOutcome, FnSuggestionSource, ReplySender,
    SuggestionRequest, SuggestionSource,
};
use parking_lot::Mutex;

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A `<form>` holding an `<input>`, attached to `<body>`.
pub fn document() -> (MemoryDocument, ElementId) {
    let mut doc = MemoryDocument::new();
    let form = doc.create_element("form");
    let input = doc.create_element("input");
    doc.append_child(doc.body(), form).unwrap();
    doc.append_child(form, input).unwrap();
    (doc, input)
}

pub fn options() -> AutoCompleteOptions {
    AutoCompleteOptions::new("/autocomplete.json")
}

/// Canned endpoint answers keyed by query.
pub fn endpoint(request: &SuggestionRequest) -> FetchOutcome {
    match request.query.as_str() {
        "app" => Ok(strings(&["apple", "application", "banana"])),
        "re" => Ok(strings(&["red", "green"])),
        "abc" => Ok(strings(&["a", "b", "c"])),
        "xy" => Err(FetchError::status(500, "Internal Server Error")),
        _ => Ok(Vec::new()),
    }
}

/// [`endpoint`] behind a source that also records every request.
pub fn recording_source() -> (
    FnSuggestionSource<impl Fn(&SuggestionRequest) -> FetchOutcome + Send + Sync>,
    Arc<Mutex<Vec<SuggestionRequest>>>,
) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    let source = FnSuggestionSource::new(move |request: &SuggestionRequest| {
        log_clone.lock().push(request.clone());
        endpoint(request)
    });
    (source, log)
}

/// A source that holds requests until the test answers them.
#[derive(Clone, Default)]
pub struct ManualSource {
    pending: Arc<Mutex<Vec<(SuggestionRequest, ReplySender)>>>,
}

impl ManualSource {
    pub fn pending_queries(&self) -> Vec<String> {
        self.pending
            .lock()
            .iter()
            .map(|(request, _)| request.query.clone())
            .collect()
    }

    /// Answer the pending request for `query`.
    pub fn answer(&self, query: &str, outcome: FetchOutcome) {
        let mut pending = self.pending.lock();
        let index = pending
            .iter()
            .position(|(request, _)| request.query == query)
            .expect("no pending request for query");
        let (_, reply) = pending.remove(index);
        reply.send(outcome).unwrap();
    }
}

impl SuggestionSource for ManualSource {
    fn fetch(&self, request: SuggestionRequest, reply: ReplySender) {
        self.pending.lock().push((request, reply));
    }
}

/// Collects formatted log output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
