//! Declarative assertion forms.
//!
//! These types describe builtin assertions as plain data so they can be
//! loaded from suite files and inspected in tests. The infrastructure layer
//! compiles them into executable assertions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A builtin assertion described as data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssertionSpec {
    /// Check response status code.
    Status {
        /// Expected status code, range or class.
        expected: StatusExpectation,
    },
    /// Check the `Content-Type` header against an alias or pattern.
    ContentType {
        /// Alias (`json`, `html`, `xml`, `text`, `form`, `urlencoded`) or regex.
        kind: String,
    },
    /// Check header value matches pattern.
    Header {
        /// Header name (case-insensitive).
        name: String,
        /// Regex pattern to search for.
        pattern: String,
    },
    /// Check header value equals a string.
    HeaderEquals {
        /// Header name.
        name: String,
        /// Expected value.
        value: String,
    },
    /// Check header value differs from a string.
    HeaderNotEquals {
        /// Header name.
        name: String,
        /// Value the header must not have.
        value: String,
    },
    /// Check header is present with a non-empty value.
    HeaderPresent {
        /// Header name.
        name: String,
    },
    /// Check header is absent or empty.
    HeaderNotPresent {
        /// Header name.
        name: String,
    },
    /// Check the `Location` header matches a pattern.
    RedirectTo {
        /// Regex pattern.
        pattern: String,
    },
    /// Check body matches regex pattern.
    BodyMatches {
        /// Regex pattern.
        pattern: String,
    },
    /// Check body equals expected text.
    BodyEquals {
        /// Expected body content.
        expected: String,
    },
    /// Check body length.
    BodyLength {
        /// Expected length in bytes.
        length: usize,
    },
    /// Check the body decodes to the given JSON value.
    JsonEquals {
        /// Expected value.
        expected: serde_json::Value,
    },
    /// Validate the body against an inline JSON schema.
    JsonSchema {
        /// Schema document.
        schema: serde_json::Value,
    },
    /// Validate the body against a JSON schema file.
    JsonSchemaFile {
        /// Path to the schema document.
        path: PathBuf,
    },
}

impl AssertionSpec {
    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Status { expected } => format!("Status code {}", expected.description()),
            Self::ContentType { kind } => format!("Content-Type matches '{kind}'"),
            Self::Header { name, pattern } => format!("Header '{name}' matches /{pattern}/"),
            Self::HeaderEquals { name, value } => format!("Header '{name}' equals '{value}'"),
            Self::HeaderNotEquals { name, value } => {
                format!("Header '{name}' does not equal '{value}'")
            }
            Self::HeaderPresent { name } => format!("Header '{name}' is present"),
            Self::HeaderNotPresent { name } => format!("Header '{name}' is not present"),
            Self::RedirectTo { pattern } => format!("Redirects to /{pattern}/"),
            Self::BodyMatches { pattern } => format!("Body matches /{pattern}/"),
            Self::BodyEquals { .. } => "Body equals expected".to_string(),
            Self::BodyLength { length } => format!("Body length == {length}"),
            Self::JsonEquals { expected } => format!("JSON equals {expected}"),
            Self::JsonSchema { .. } => "Body is valid against JSON schema".to_string(),
            Self::JsonSchemaFile { path } => {
                format!("Body is valid against JSON schema {}", path.display())
            }
        }
    }
}

/// Named status code classes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// 200-399.
    Ok,
    /// 400-599.
    Error,
    /// 400-499.
    ClientError,
    /// 500-599.
    ServerError,
    /// 301-302 only. 300 and 303-308 are not included.
    Redirect,
}

impl StatusClass {
    /// Returns the inclusive bounds of this class.
    #[must_use]
    pub const fn bounds(self) -> (u16, u16) {
        match self {
            Self::Ok => (200, 399),
            Self::Error => (400, 599),
            Self::ClientError => (400, 499),
            Self::ServerError => (500, 599),
            Self::Redirect => (301, 302),
        }
    }
}

/// Expected status code value or range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// A named class such as `ok` or `client_error`.
    Class(StatusClass),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub const fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { .. } | Self::Class(_) => {
                let (min, max) = self.bounds();
                status >= min && status <= max
            }
        }
    }

    /// Returns the inclusive bounds of the expectation.
    #[must_use]
    pub const fn bounds(&self) -> (u16, u16) {
        match self {
            Self::Exact(code) => (*code, *code),
            Self::Range { min, max } => (*min, *max),
            Self::Class(class) => class.bounds(),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::Class(class) => {
                let (min, max) = class.bounds();
                format!("in {min}-{max}")
            }
        }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Create an inclusive range expectation.
    #[must_use]
    pub const fn range(min: u16, max: u16) -> Self {
        Self::Range { min, max }
    }

    /// Create an "ok" expectation (200-399).
    #[must_use]
    pub const fn ok() -> Self {
        Self::Class(StatusClass::Ok)
    }

    /// Create an "error" expectation (400-599).
    #[must_use]
    pub const fn error() -> Self {
        Self::Class(StatusClass::Error)
    }

    /// Create a "client error" expectation (400-499).
    #[must_use]
    pub const fn client_error() -> Self {
        Self::Class(StatusClass::ClientError)
    }

    /// Create a "server error" expectation (500-599).
    #[must_use]
    pub const fn server_error() -> Self {
        Self::Class(StatusClass::ServerError)
    }

    /// Create a "redirect" expectation (301-302).
    #[must_use]
    pub const fn redirect() -> Self {
        Self::Class(StatusClass::Redirect)
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_status_expectation_exact() {
        let exp = StatusExpectation::exact(200);
        assert!(exp.matches(200));
        assert!(!exp.matches(201));
    }

    #[test]
    fn test_status_expectation_range() {
        let exp = StatusExpectation::range(200, 399);
        for code in [200, 204, 399] {
            assert!(exp.matches(code), "{code} should match");
        }
        for code in [199, 400] {
            assert!(!exp.matches(code), "{code} should not match");
        }
    }

    #[test]
    fn test_status_classes() {
        assert_eq!(StatusExpectation::ok().bounds(), (200, 399));
        assert_eq!(StatusExpectation::error().bounds(), (400, 599));
        assert_eq!(StatusExpectation::client_error().bounds(), (400, 499));
        assert_eq!(StatusExpectation::server_error().bounds(), (500, 599));
    }

    #[test]
    fn test_redirect_class_is_narrow() {
        let exp = StatusExpectation::redirect();
        assert!(exp.matches(301));
        assert!(exp.matches(302));
        for code in [300, 303, 304, 307, 308] {
            assert!(!exp.matches(code), "{code} should not match");
        }
    }

    #[test]
    fn test_assertion_description() {
        let assertion = AssertionSpec::Status {
            expected: StatusExpectation::exact(200),
        };
        assert_eq!(assertion.description(), "Status code = 200");

        let assertion = AssertionSpec::Header {
            name: "Content-Type".to_string(),
            pattern: "json".to_string(),
        };
        assert_eq!(assertion.description(), "Header 'Content-Type' matches /json/");
    }

    #[test]
    fn test_spec_deserialization() {
        let specs: Vec<AssertionSpec> = serde_json::from_value(json!([
            {"type": "status", "expected": 201},
            {"type": "status", "expected": {"min": 200, "max": 299}},
            {"type": "status", "expected": "client_error"},
            {"type": "header_present", "name": "ETag"},
            {"type": "json_equals", "expected": {"ok": true}},
        ]))
        .unwrap();

        assert_eq!(
            specs,
            vec![
                AssertionSpec::Status {
                    expected: StatusExpectation::exact(201)
                },
                AssertionSpec::Status {
                    expected: StatusExpectation::range(200, 299)
                },
                AssertionSpec::Status {
                    expected: StatusExpectation::client_error()
                },
                AssertionSpec::HeaderPresent {
                    name: "ETag".to_string()
                },
                AssertionSpec::JsonEquals {
                    expected: json!({"ok": true})
                },
            ]
        );
    }
}
