//! Status code assertions.

use vouch_application::Assertion;
use vouch_domain::{AssertionError, AssertionResult, Exchange, StatusExpectation};

/// Asserts the status code equals `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEquals {
    /// Expected status code.
    pub code: u16,
}

impl StatusEquals {
    /// Creates the assertion.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self { code }
    }
}

impl Assertion for StatusEquals {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let actual = exchange.response().status().as_u16();
        if actual == self.code {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Unexpected status code: {actual} != {}",
                self.code
            )))
        }
    }

    fn describe(&self) -> String {
        format!("Status code {}", StatusExpectation::exact(self.code).description())
    }
}

/// Asserts the status code lies within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRange {
    /// Lower bound (inclusive).
    pub min: u16,
    /// Upper bound (inclusive).
    pub max: u16,
}

impl StatusRange {
    /// Creates the assertion.
    #[must_use]
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// 200-399.
    #[must_use]
    pub const fn ok() -> Self {
        Self::from_expectation(StatusExpectation::ok())
    }

    /// 400-599.
    #[must_use]
    pub const fn error() -> Self {
        Self::from_expectation(StatusExpectation::error())
    }

    /// 400-499.
    #[must_use]
    pub const fn client_error() -> Self {
        Self::from_expectation(StatusExpectation::client_error())
    }

    /// 500-599.
    #[must_use]
    pub const fn server_error() -> Self {
        Self::from_expectation(StatusExpectation::server_error())
    }

    /// 301-302 only.
    #[must_use]
    pub const fn redirect() -> Self {
        Self::from_expectation(StatusExpectation::redirect())
    }

    /// Uses the bounds of a declarative expectation.
    #[must_use]
    pub const fn from_expectation(expected: StatusExpectation) -> Self {
        let (min, max) = expected.bounds();
        Self { min, max }
    }
}

impl Assertion for StatusRange {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let actual = exchange.response().status();
        if actual.is_within(self.min, self.max) {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Status code outside the given range: {} not in {}-{}",
                actual.as_u16(),
                self.min,
                self.max
            )))
        }
    }

    fn describe(&self) -> String {
        format!("Status code in {}-{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::assertions::test_support::exchange;

    fn status(code: u16) -> Exchange {
        exchange(code, &[], "")
    }

    #[test]
    fn test_status_equals() {
        assert!(StatusEquals::new(200).evaluate(&status(200)).is_ok());

        let err = StatusEquals::new(201).evaluate(&status(200)).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected status code: 200 != 201");
    }

    #[test]
    fn test_status_range() {
        let range = StatusRange::new(200, 399);
        for code in [200, 204, 399] {
            assert!(range.evaluate(&status(code)).is_ok(), "{code} should pass");
        }
        for code in [199, 400] {
            assert!(range.evaluate(&status(code)).is_err(), "{code} should fail");
        }

        let err = range.evaluate(&status(404)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status code outside the given range: 404 not in 200-399"
        );
    }

    #[test]
    fn test_named_ranges() {
        assert_eq!(StatusRange::ok(), StatusRange::new(200, 399));
        assert_eq!(StatusRange::error(), StatusRange::new(400, 599));
        assert_eq!(StatusRange::client_error(), StatusRange::new(400, 499));
        assert_eq!(StatusRange::server_error(), StatusRange::new(500, 599));
        assert_eq!(StatusRange::redirect(), StatusRange::new(301, 302));
    }

    #[test]
    fn test_redirect_excludes_other_3xx() {
        let redirect = StatusRange::redirect();
        assert!(redirect.evaluate(&status(301)).is_ok());
        assert!(redirect.evaluate(&status(302)).is_ok());
        assert!(redirect.evaluate(&status(300)).is_err());
        assert!(redirect.evaluate(&status(307)).is_err());
    }
}
