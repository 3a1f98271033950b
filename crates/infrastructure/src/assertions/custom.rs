//! Caller-defined assertions over the response and request.

use vouch_application::Assertion;
use vouch_domain::{AssertionResult, Exchange, RequestView, Response};

/// Wraps a function of `(response, request)`.
pub struct Predicate<F> {
    name: String,
    func: F,
}

impl<F> Predicate<F>
where
    F: Fn(&Response, &RequestView) -> AssertionResult + Send + Sync,
{
    /// Creates a named predicate.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Assertion for Predicate<F>
where
    F: Fn(&Response, &RequestView) -> AssertionResult + Send + Sync,
{
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        (self.func)(exchange.response(), exchange.request())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

impl<F> std::fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
