//! Header assertions.

use vouch_application::Assertion;
use vouch_domain::{AssertionError, AssertionResult, Exchange};

use super::Pattern;

/// Asserts a header value contains a match for a regex.
///
/// A missing header is matched as the empty string.
#[derive(Debug, Clone)]
pub struct HeaderMatch {
    name: String,
    pattern: Pattern,
}

impl HeaderMatch {
    /// Creates the assertion.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: Pattern::new(pattern),
        }
    }
}

impl Assertion for HeaderMatch {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let value = exchange.response().header(&self.name);
        if self.pattern.is_match(value)? {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Header mismatch: '{}' value '{value}' should match '{}'",
                self.name,
                self.pattern.as_str()
            )))
        }
    }

    fn describe(&self) -> String {
        format!("Header {} matches {}", self.name, self.pattern.as_str())
    }
}

/// Asserts a header value equals a string exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEquals {
    name: String,
    value: String,
}

impl HeaderEquals {
    /// Creates the assertion.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Assertion for HeaderEquals {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let actual = exchange.response().header(&self.name);
        if actual == self.value {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Header mismatch: '{}' is '{actual}', expected '{}'",
                self.name, self.value
            )))
        }
    }

    fn describe(&self) -> String {
        format!("Header {} equals {}", self.name, self.value)
    }
}

/// Asserts a header value differs from a string.
///
/// A missing header reads as empty, so it only fails when the forbidden
/// value is itself empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNotEquals {
    name: String,
    value: String,
}

impl HeaderNotEquals {
    /// Creates the assertion.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Assertion for HeaderNotEquals {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        if exchange.response().header(&self.name) == self.value {
            Err(AssertionError::mismatch(format!(
                "Header mismatch: '{}' should not equal '{}'",
                self.name, self.value
            )))
        } else {
            Ok(())
        }
    }

    fn describe(&self) -> String {
        format!("Header {} not equal to {}", self.name, self.value)
    }
}

/// Asserts a header has a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPresent {
    name: String,
}

impl HeaderPresent {
    /// Creates the assertion.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Assertion for HeaderPresent {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        if exchange.response().header(&self.name).is_empty() {
            Err(AssertionError::mismatch(format!(
                "Header is not present: {}",
                self.name
            )))
        } else {
            Ok(())
        }
    }

    fn describe(&self) -> String {
        format!("Header {} present", self.name)
    }
}

/// Asserts a header is absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNotPresent {
    name: String,
}

impl HeaderNotPresent {
    /// Creates the assertion.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Assertion for HeaderNotPresent {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let value = exchange.response().header(&self.name);
        if value.is_empty() {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Header should not be present: {} = '{value}'",
                self.name
            )))
        }
    }

    fn describe(&self) -> String {
        format!("Header {} not present", self.name)
    }
}

/// Asserts the `Location` header is set and matches a regex.
///
/// The pattern is searched in the raw header value. A relative location is
/// not resolved against the request URL.
#[derive(Debug, Clone)]
pub struct RedirectTo {
    pattern: Pattern,
}

impl RedirectTo {
    /// Creates the assertion.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::new(pattern),
        }
    }
}

impl Assertion for RedirectTo {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let location = exchange.response().header("Location");
        if location.is_empty() {
            return Err(AssertionError::mismatch(
                "Redirect error: missing Location header",
            ));
        }
        if self.pattern.is_match(location)? {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Redirect mismatch: Location '{location}' should match '{}'",
                self.pattern.as_str()
            )))
        }
    }

    fn describe(&self) -> String {
        format!("Redirects to {}", self.pattern.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vouch_domain::ErrorKind;

    use super::*;
    use crate::assertions::test_support::with_headers;

    #[test]
    fn test_header_match() {
        let exchange = with_headers(&[("Content-Type", "application/json; charset=utf-8")]);

        assert!(HeaderMatch::new("content-type", "json").evaluate(&exchange).is_ok());
        assert!(HeaderMatch::new("Content-Type", "^application/").evaluate(&exchange).is_ok());
        assert!(HeaderMatch::new("Content-Type", "xml").evaluate(&exchange).is_err());
    }

    #[test]
    fn test_header_match_missing_is_empty_string() {
        let exchange = with_headers(&[]);
        assert!(HeaderMatch::new("X-Missing", "^$").evaluate(&exchange).is_ok());
        assert!(HeaderMatch::new("X-Missing", ".+").evaluate(&exchange).is_err());
    }

    #[test]
    fn test_header_match_invalid_pattern() {
        let exchange = with_headers(&[("Server", "nginx")]);
        let err = HeaderMatch::new("Server", "(").evaluate(&exchange).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_header_equals() {
        let exchange = with_headers(&[("Server", "nginx")]);
        assert!(HeaderEquals::new("server", "nginx").evaluate(&exchange).is_ok());

        let err = HeaderEquals::new("Server", "apache").evaluate(&exchange).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Header mismatch: 'Server' is 'nginx', expected 'apache'"
        );
    }

    #[test]
    fn test_header_not_equals() {
        let exchange = with_headers(&[("Server", "nginx")]);
        assert!(HeaderNotEquals::new("Server", "apache").evaluate(&exchange).is_ok());
        assert!(HeaderNotEquals::new("Server", "nginx").evaluate(&exchange).is_err());

        // missing header is only equal to the empty string
        assert!(HeaderNotEquals::new("X-Missing", "value").evaluate(&exchange).is_ok());
        assert!(HeaderNotEquals::new("X-Missing", "").evaluate(&exchange).is_err());
    }

    #[test]
    fn test_header_presence() {
        let exchange = with_headers(&[("Server", "nginx"), ("X-Empty", "")]);

        assert!(HeaderPresent::new("server").evaluate(&exchange).is_ok());
        assert!(HeaderPresent::new("X-Missing").evaluate(&exchange).is_err());
        assert!(HeaderPresent::new("X-Empty").evaluate(&exchange).is_err());

        assert!(HeaderNotPresent::new("X-Missing").evaluate(&exchange).is_ok());
        assert!(HeaderNotPresent::new("X-Empty").evaluate(&exchange).is_ok());
        assert!(HeaderNotPresent::new("Server").evaluate(&exchange).is_err());
    }

    #[test]
    fn test_redirect_to() {
        let exchange = with_headers(&[("Location", "http://foo/bar")]);

        for pattern in ["http://foo/bar", "foo/bar", "^http://foo/bar$"] {
            assert!(
                RedirectTo::new(pattern).evaluate(&exchange).is_ok(),
                "{pattern} should match"
            );
        }
        for pattern in ["^http://foo$", "baz"] {
            assert!(
                RedirectTo::new(pattern).evaluate(&exchange).is_err(),
                "{pattern} should not match"
            );
        }
    }

    #[test]
    fn test_redirect_missing_location_is_distinct() {
        let missing = RedirectTo::new("foo")
            .evaluate(&with_headers(&[]))
            .unwrap_err();
        let mismatch = RedirectTo::new("foo")
            .evaluate(&with_headers(&[("Location", "/bar")]))
            .unwrap_err();

        assert_eq!(missing.to_string(), "Redirect error: missing Location header");
        assert!(mismatch.to_string().starts_with("Redirect mismatch:"));
        assert_ne!(missing, mismatch);
    }

    #[test]
    fn test_redirect_relative_location_matches_raw_value_only() {
        // request URL is http://example.com/start
        let exchange = with_headers(&[("Location", "/login")]);
        assert!(RedirectTo::new("^/login$").evaluate(&exchange).is_ok());

        for pattern in ["example\\.com", "^http://example.com/login$"] {
            let err = RedirectTo::new(pattern).evaluate(&exchange).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Redirect mismatch: Location '/login' should match '{pattern}'")
            );
        }
    }
}
