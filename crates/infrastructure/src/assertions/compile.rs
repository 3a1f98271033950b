//! Turns declarative assertion forms into executable assertions.

use std::sync::Arc;

use vouch_application::Assertion;
use vouch_domain::{AssertionSpec, StatusExpectation};

use super::{
    BodyEquals, BodyLength, BodyMatch, ContentType, HeaderEquals, HeaderMatch, HeaderNotEquals,
    HeaderNotPresent, HeaderPresent, JsonEquals, JsonSchema, RedirectTo, StatusEquals,
    StatusRange,
};

/// Builds the assertion described by `spec`.
///
/// Construction never fails. Invalid patterns or schemas are reported by
/// the returned assertion when it is evaluated.
#[must_use]
pub fn compile(spec: &AssertionSpec) -> Arc<dyn Assertion> {
    match spec {
        AssertionSpec::Status { expected } => match *expected {
            StatusExpectation::Exact(code) => Arc::new(StatusEquals::new(code)),
            other => Arc::new(StatusRange::from_expectation(other)),
        },
        AssertionSpec::ContentType { kind } => Arc::new(ContentType::new(kind.as_str())),
        AssertionSpec::Header { name, pattern } => {
            Arc::new(HeaderMatch::new(name.as_str(), pattern.as_str()))
        }
        AssertionSpec::HeaderEquals { name, value } => {
            Arc::new(HeaderEquals::new(name.as_str(), value.as_str()))
        }
        AssertionSpec::HeaderNotEquals { name, value } => {
            Arc::new(HeaderNotEquals::new(name.as_str(), value.as_str()))
        }
        AssertionSpec::HeaderPresent { name } => Arc::new(HeaderPresent::new(name.as_str())),
        AssertionSpec::HeaderNotPresent { name } => Arc::new(HeaderNotPresent::new(name.as_str())),
        AssertionSpec::RedirectTo { pattern } => Arc::new(RedirectTo::new(pattern.as_str())),
        AssertionSpec::BodyMatches { pattern } => Arc::new(BodyMatch::new(pattern.as_str())),
        AssertionSpec::BodyEquals { expected } => Arc::new(BodyEquals::new(expected.as_str())),
        AssertionSpec::BodyLength { length } => Arc::new(BodyLength::new(*length)),
        AssertionSpec::JsonEquals { expected } => Arc::new(JsonEquals::new(expected.clone())),
        AssertionSpec::JsonSchema { schema } => Arc::new(JsonSchema::from_value(schema)),
        AssertionSpec::JsonSchemaFile { path } => Arc::new(JsonSchema::from_file(path)),
    }
}
