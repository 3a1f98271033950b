//! Failure sinks.
//!
//! A sink receives the single failure of an expectation run. Tests usually
//! want [`PanicSink`], services and tools [`TracingSink`], and test suites
//! of the engine itself [`RecordingSink`].

use parking_lot::Mutex;
use tracing::{error, warn};
use vouch_application::FailureSink;
use vouch_domain::{AssertionError, Exchange, ReportSettings};

use crate::dump::ExchangeDump;

/// Panics with the failure message, failing the current test.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicSink;

impl FailureSink for PanicSink {
    #[allow(clippy::panic)]
    fn report(&self, error: &AssertionError) {
        panic!("{error}");
    }
}

/// Logs failures at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl FailureSink for TracingSink {
    fn report(&self, failure: &AssertionError) {
        error!(kind = ?failure.kind(), "{failure}");
    }
}

/// Keeps every reported failure in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    errors: Mutex<Vec<AssertionError>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the reported failures.
    #[must_use]
    pub fn errors(&self) -> Vec<AssertionError> {
        self.errors.lock().clone()
    }

    /// Returns the messages of the reported failures.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.lock().iter().map(ToString::to_string).collect()
    }

    /// Returns the number of reported failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }
}

impl FailureSink for RecordingSink {
    fn report(&self, error: &AssertionError) {
        self.errors.lock().push(error.clone());
    }
}

/// Logs a dump of the exchange before forwarding a failure.
///
/// The dump is emitted at `warn` level so it precedes the failure in the
/// test output. Failures without an exchange are forwarded as is.
#[derive(Debug)]
pub struct DumpingSink<S> {
    inner: S,
    settings: ReportSettings,
}

impl<S: FailureSink> DumpingSink<S> {
    /// Wraps `inner` with the given settings.
    pub const fn new(inner: S, settings: ReportSettings) -> Self {
        Self { inner, settings }
    }

    /// Returns the wrapped sink.
    pub const fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: FailureSink> FailureSink for DumpingSink<S> {
    fn report(&self, error: &AssertionError) {
        self.inner.report(error);
    }

    fn report_with_exchange(&self, error: &AssertionError, exchange: Option<&Exchange>) {
        if let Some(exchange) = exchange
            && self.settings.dump_on_failure
        {
            let dump = ExchangeDump::new(self.settings.clone()).render(exchange);
            warn!(failure = %error, "exchange under test:\n{dump}");
        }
        self.inner.report_with_exchange(error, exchange);
    }
}
