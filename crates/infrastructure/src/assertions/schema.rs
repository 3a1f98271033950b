//! JSON schema validation.

use std::path::Path;
use std::sync::Arc;

use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;
use vouch_application::Assertion;
use vouch_domain::{
    AssertionError, AssertionResult, CanonicalValue, DecodeSubject, Exchange, UsageError,
};

/// Validates the body against a JSON schema.
///
/// The schema is loaded and compiled when the assertion is built. Load
/// failures are kept and returned on every evaluation.
#[derive(Clone)]
pub struct JsonSchema {
    source: String,
    validator: Result<Arc<Validator>, AssertionError>,
}

impl JsonSchema {
    /// Builds from a schema string, detecting its form.
    ///
    /// Text starting with `{` is an inline schema. `http://` and
    /// `https://` references are rejected. Anything else is read as a file
    /// path, with an optional `file://` prefix.
    #[must_use]
    pub fn new(schema: &str) -> Self {
        let trimmed = schema.trim();
        if trimmed.starts_with('{') {
            return Self::inline(schema);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Self {
                source: trimmed.to_string(),
                validator: Err(UsageError::InvalidSchema(format!(
                    "remote schema references are not supported: {trimmed}"
                ))
                .into()),
            };
        }
        Self::from_file(trimmed.strip_prefix("file://").unwrap_or(trimmed))
    }

    /// Builds from inline schema text.
    #[must_use]
    pub fn inline(schema: &str) -> Self {
        let validator = serde_json::from_str::<Value>(schema)
            .map_err(|e| AssertionError::decode(DecodeSubject::Schema, e.to_string()))
            .and_then(|value| compile(&value));
        Self {
            source: "inline schema".to_string(),
            validator,
        }
    }

    /// Builds from a schema file.
    #[must_use]
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let source = path.display().to_string();
        debug!(path = %source, "Loading JSON schema");
        let validator = std::fs::read_to_string(path)
            .map_err(|e| {
                AssertionError::from(UsageError::InvalidSchema(format!(
                    "cannot read {source}: {e}"
                )))
            })
            .and_then(|text| {
                serde_json::from_str::<Value>(&text)
                    .map_err(|e| AssertionError::decode(DecodeSubject::Schema, e.to_string()))
            })
            .and_then(|value| compile(&value));
        Self { source, validator }
    }

    /// Builds from an already parsed schema.
    #[must_use]
    pub fn from_value(schema: &Value) -> Self {
        Self {
            source: "inline schema".to_string(),
            validator: compile(schema),
        }
    }
}

fn compile(schema: &Value) -> Result<Arc<Validator>, AssertionError> {
    jsonschema::validator_for(schema)
        .map(Arc::new)
        .map_err(|e| UsageError::InvalidSchema(e.to_string()).into())
}

impl Assertion for JsonSchema {
    fn evaluate(&self, exchange: &Exchange) -> AssertionResult {
        let validator = self.validator.as_ref().map_err(Clone::clone)?;
        let body = CanonicalValue::decode(exchange.response().body().as_bytes(), DecodeSubject::Body)?
            .to_json();

        let violations: Vec<String> = validator
            .iter_errors(&body)
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "(root)".to_string() } else { path };
                format!("{path}: {error}")
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AssertionError::SchemaViolations(violations))
        }
    }

    fn describe(&self) -> String {
        format!("Matches JSON schema ({})", self.source)
    }
}

impl std::fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSchema")
            .field("source", &self.source)
            .field("loaded", &self.validator.is_ok())
            .finish()
    }
}
