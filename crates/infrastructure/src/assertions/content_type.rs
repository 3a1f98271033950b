//! `Content-Type` assertion with aliases.

use vouch_application::Assertion;
use vouch_domain::{AssertionError, AssertionResult, Exchange};

use super::Pattern;

/// Returns the regex used for a content type alias.
///
/// Known aliases are `json`, `html`, `xml`, `text`, `form` and
/// `urlencoded`. `xml` means `application/xml` only; use a regex such as
/// `text/xml` for the legacy type. Anything else is returned unchanged and
/// used as a regex.
#[must_use]
pub fn content_type_pattern(kind: &str) -> String {
    let essence = match kind {
        "json" => mime::APPLICATION_JSON,
        "html" => mime::TEXT_HTML,
        "text" => mime::TEXT_PLAIN,
        "form" => mime::MULTIPART_FORM_DATA,
        "urlencoded" => mime::APPLICATION_WWW_FORM_URLENCODED,
        "xml" => {
            return regex::escape(&format!("{}/{}", mime::APPLICATION, mime::XML));
        }
        other => return other.to_string(),
    };
    regex::escape(essence.essence_str())
}

/// Asserts the `Content-Type` header matches an alias or regex.
#[derive(Debug, Clone)]
pub struct ContentType {
    kind: String,
    pattern: Pattern,
}

impl ContentType {
    /// Creates the assertion.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        let pattern = Pattern::new(content_type_pattern(&kind));
        Self { kind, pattern }
    }
}

impl Assertion for ContentType {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let header = exchange.response().header("Content-Type");
        if self.pattern.is_match(header)? {
            Ok(())
        } else {
            Err(AssertionError::mismatch(format!(
                "Unexpected content type: '{header}' should match '{}'",
                self.kind
            )))
        }
    }

    fn describe(&self) -> String {
        format!("Content type {}", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::assertions::test_support::with_headers;

    fn typed(value: &str) -> Exchange {
        with_headers(&[("Content-Type", value)])
    }

    #[test]
    fn test_aliases() {
        let cases = [
            ("json", "application/json; charset=utf-8"),
            ("html", "text/html"),
            ("xml", "application/xml"),
            ("text", "text/plain"),
            ("form", "multipart/form-data; boundary=xyz"),
            ("urlencoded", "application/x-www-form-urlencoded"),
        ];
        for (kind, header) in cases {
            assert!(
                ContentType::new(kind).evaluate(&typed(header)).is_ok(),
                "{kind} should match {header}"
            );
        }
    }

    #[test]
    fn test_xml_alias_is_application_xml_only() {
        let err = ContentType::new("xml")
            .evaluate(&typed("text/xml; charset=utf-8"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected content type: 'text/xml; charset=utf-8' should match 'xml'"
        );
        assert_eq!(content_type_pattern("xml"), "application/xml");
        assert!(ContentType::new("text/xml").evaluate(&typed("text/xml")).is_ok());
    }

    #[test]
    fn test_alias_mismatch() {
        let err = ContentType::new("json")
            .evaluate(&typed("text/html"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected content type: 'text/html' should match 'json'"
        );
    }

    #[test]
    fn test_unknown_kind_is_regex() {
        assert!(ContentType::new("^image/").evaluate(&typed("image/png")).is_ok());
        assert!(ContentType::new("^image/").evaluate(&typed("text/plain")).is_err());
        assert_eq!(content_type_pattern("vnd\\.api"), "vnd\\.api");
    }

    #[test]
    fn test_missing_header_fails() {
        assert!(ContentType::new("json").evaluate(&with_headers(&[])).is_err());
    }
}
