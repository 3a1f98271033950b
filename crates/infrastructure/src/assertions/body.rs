//! Body assertions.

use vouch_application::Assertion;
use vouch_domain::{AssertionError, AssertionResult, Exchange};

use super::Pattern;

/// Asserts the body text contains a match for a regex.
#[derive(Debug, Clone)]
pub struct BodyMatch {
    pattern: Pattern,
}

impl BodyMatch {
    /// Creates the assertion.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::new(pattern),
        }
    }
}

impl Assertion for BodyMatch {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let text = exchange.response().body().text_lossy();
        if self.pattern.is_match(&text)? {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Body mismatch: cannot match pattern '{}'",
                self.pattern.as_str()
            )))
        }
    }

    fn describe(&self) -> String {
        format!("Body matches {}", self.pattern.as_str())
    }
}

/// Asserts the body equals a string.
///
/// At most one trailing `\n` is stripped from the body before comparing.
/// All other whitespace is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyEquals {
    expected: String,
}

impl BodyEquals {
    /// Creates the assertion.
    #[must_use]
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Assertion for BodyEquals {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let text = exchange.response().body().text_lossy();
        let actual = text.strip_suffix('\n').unwrap_or(&text);
        if actual == self.expected {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Bodies mismatch:\n\thave: {actual:?}\n\twant: {:?}",
                self.expected
            )))
        }
    }

    fn describe(&self) -> String {
        "Body equals expected text".to_string()
    }
}

/// Asserts the body length in bytes.
///
/// A declared non-zero `Content-Length` wins. Otherwise the buffered body
/// is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLength {
    length: usize,
}

impl BodyLength {
    /// Creates the assertion.
    #[must_use]
    pub const fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Assertion for BodyLength {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let response = exchange.response();
        let actual = match response.content_length() {
            Some(declared) if declared != 0 => declared,
            _ => response.body().len(),
        };
        if actual == self.length {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Body length mismatch: '{actual}' should be equal '{}'",
                self.length
            )))
        }
    }

    fn describe(&self) -> String {
        format!("Body length {}", self.length)
    }
}
