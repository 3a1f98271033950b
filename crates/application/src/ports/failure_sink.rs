//! Failure sink port

use vouch_domain::{AssertionError, Exchange};

/// Receives the verdict failure of an expectation.
///
/// `report` is called at most once per run: for the first failing
/// assertion, a transport error, or a usage error.
pub trait FailureSink: Send + Sync {
    /// Reports a failure.
    fn report(&self, error: &AssertionError);

    /// Reports a failure together with the exchange it was observed on.
    ///
    /// `exchange` is `None` for transport and usage errors. The default
    /// implementation ignores the exchange.
    fn report_with_exchange(&self, error: &AssertionError, exchange: Option<&Exchange>) {
        let _ = exchange;
        self.report(error);
    }
}
