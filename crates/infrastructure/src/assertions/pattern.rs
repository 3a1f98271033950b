//! Compiled regular expressions.

use regex::Regex;
use vouch_domain::{AssertionError, UsageError};

/// A regex compiled once when the assertion is built.
///
/// Compilation errors are kept and surface as
/// [`UsageError::InvalidPattern`] when the assertion is evaluated, so
/// assertion constructors stay infallible.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, String>,
}

impl Pattern {
    /// Compiles `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Regex::new(&source).map_err(|e| e.to_string());
        Self { source, compiled }
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the compile error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.compiled.as_ref().err().map(String::as_str)
    }

    /// Searches `haystack` for the pattern (unanchored).
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::InvalidPattern`] if the pattern did not compile.
    pub fn is_match(&self, haystack: &str) -> Result<bool, AssertionError> {
        match &self.compiled {
            Ok(regex) => Ok(regex.is_match(haystack)),
            Err(message) => Err(UsageError::InvalidPattern {
                pattern: self.source.clone(),
                message: message.clone(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use vouch_domain::ErrorKind;

    use super::*;

    #[test]
    fn test_search_is_unanchored() {
        let pattern = Pattern::new("json");
        assert!(pattern.is_match("application/json; charset=utf-8").unwrap());
        assert!(!pattern.is_match("text/html").unwrap());
        assert_eq!(pattern.as_str(), "json");
    }

    #[test]
    fn test_invalid_pattern_is_usage_error() {
        let pattern = Pattern::new("([a-z");
        assert!(pattern.error().is_some());
        let err = pattern.is_match("abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
}
