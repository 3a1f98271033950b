//! Assertion port

use std::fmt;
use std::sync::Arc;

use vouch_domain::{AssertionResult, Exchange};

/// A pure predicate over one completed exchange.
///
/// Implementations hold only their configured parameters and must not
/// mutate shared state, so one instance can be evaluated by many
/// expectations concurrently.
pub trait Assertion: Send + Sync {
    /// Evaluates the assertion against the exchange.
    ///
    /// # Errors
    ///
    /// Returns the failure describing why the exchange does not satisfy
    /// the assertion.
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult;

    /// Returns a short human-readable description.
    fn describe(&self) -> String {
        "custom assertion".to_string()
    }
}

impl<A: Assertion + ?Sized> Assertion for Arc<A> {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        (**self).evaluate(exchange)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Adapts a plain closure into an [`Assertion`].
pub struct FnAssertion<F> {
    name: String,
    func: F,
}

impl<F> FnAssertion<F>
where
    F: Fn(&Exchange) -> AssertionResult + Send + Sync,
{
    /// Wraps `func` under a display name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Assertion for FnAssertion<F>
where
    F: Fn(&Exchange) -> AssertionResult + Send + Sync,
{
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        (self.func)(exchange)
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

impl<F> fmt::Debug for FnAssertion<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAssertion")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
