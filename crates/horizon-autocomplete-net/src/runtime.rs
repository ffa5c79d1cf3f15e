//! Runtime management for async operations.
//!
//! Suggestion requests run on a tokio runtime while the widget itself is
//! driven synchronously. This module owns a lazily created, process-wide
//! runtime for callers that do not bring their own.

use std::sync::OnceLock;

use tokio::runtime::Runtime;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Initialize the async runtime.
///
/// If not called explicitly, the runtime is created on first use.
///
/// # Panics
///
/// Panics if the operating system refuses to create the worker threads.
pub fn init() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("horizon-autocomplete-net")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Get a reference to the async runtime.
///
/// Initializes the runtime if it hasn't been created yet.
pub fn get() -> &'static Runtime {
    init()
}

/// Block on a future using the global runtime.
///
/// # Warning
///
/// Do not call this from within an async context, as it will panic.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    get().block_on(future)
}

/// Spawn a future on the global runtime.
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    get().spawn(future)
}
