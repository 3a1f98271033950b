//! JSON body assertions.

use serde_json::Value;
use vouch_application::Assertion;
use vouch_domain::{
    AssertionResult, CanonicalValue, DecodeSubject, Exchange, Expected, json_equals,
};

/// Asserts the body decodes to the same JSON value as `expected`.
///
/// Key order and insignificant whitespace are ignored. Numbers compare by
/// value, so `1` equals `1.0`.
#[derive(Debug, Clone)]
pub struct JsonEquals {
    expected: Expected,
}

impl JsonEquals {
    /// Creates the assertion.
    #[must_use]
    pub fn new(expected: impl Into<Expected>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Assertion for JsonEquals {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        json_equals(exchange.response().body().as_bytes(), &self.expected)
    }

    fn describe(&self) -> String {
        "JSON body equals expected value".to_string()
    }
}

/// Decodes the body as JSON and hands it to a callback.
///
/// A body that is not valid JSON fails with a decode error before the
/// callback runs. An empty body decodes to `null`.
pub struct OnJson<F> {
    func: F,
}

impl<F> OnJson<F>
where
    F: Fn(&Value) -> AssertionResult + Send + Sync,
{
    /// Creates the assertion.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Assertion for OnJson<F>
where
    F: Fn(&Value) -> AssertionResult + Send + Sync,
{
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let body = CanonicalValue::decode(exchange.response().body().as_bytes(), DecodeSubject::Body)?;
        (self.func)(&body.to_json())
    }

    fn describe(&self) -> String {
        "JSON body callback".to_string()
    }
}

impl<F> std::fmt::Debug for OnJson<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnJson").finish_non_exhaustive()
    }
}
