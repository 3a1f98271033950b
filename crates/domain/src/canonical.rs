//! Canonical JSON values and the expected-value coercion table.
//!
//! Both sides of a JSON comparison are decoded into [`CanonicalValue`]
//! before they are compared, so key order, whitespace and number spelling
//! never influence the verdict.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::{AssertionError, AssertionResult, DecodeError, DecodeSubject};

/// Decoded JSON used for equality.
///
/// Objects are keyed by a sorted map, so key order is insignificant.
/// Numbers compare by value regardless of their representation: `5`
/// equals `5.0`.
#[derive(Debug, Clone)]
pub enum CanonicalValue {
    /// JSON `null`, also the canonical form of an empty document.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(Number),
    /// JSON string.
    String(String),
    /// Ordered list.
    Array(Vec<CanonicalValue>),
    /// Mapping with insignificant key order.
    Object(BTreeMap<String, CanonicalValue>),
}

impl CanonicalValue {
    /// Converts a parsed JSON value.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from_json).collect()),
            Value::Object(fields) => Self::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Decodes raw JSON bytes.
    ///
    /// A document that is empty or only whitespace decodes to
    /// [`CanonicalValue::Null`].
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] tagged with `subject` if the bytes are not
    /// valid JSON.
    pub fn decode(bytes: &[u8], subject: DecodeSubject) -> Result<Self, DecodeError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::Null);
        }
        serde_json::from_slice::<Value>(bytes)
            .map(Self::from_json)
            .map_err(|e| DecodeError::new(subject, e.to_string()))
    }

    /// Converts back into a JSON value with sorted object keys.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl PartialEq for CanonicalValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => numbers_equal(a, b),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Compares integers exactly, integers against floats exactly, and two
/// floats as floats.
#[allow(clippy::float_cmp)]
fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integer(a), integer(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => b.as_f64().and_then(integral_float) == Some(x),
        (None, Some(y)) => a.as_f64().and_then(integral_float) == Some(y),
        (None, None) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Returns the float as an integer if it has no fractional part and lies in
/// the range JSON integers decode to.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral_float(f: f64) -> Option<i128> {
    // [-2^63, 2^64)
    let in_range = (-9_223_372_036_854_775_808.0..18_446_744_073_709_551_616.0).contains(&f);
    (in_range && f.fract() == 0.0).then(|| f as i128)
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// A value that renders itself as JSON.
pub trait RenderJson: Send + Sync {
    /// Returns the JSON encoding of the value.
    ///
    /// # Errors
    ///
    /// Returns a message describing why rendering failed.
    fn render_json(&self) -> Result<Vec<u8>, String>;
}

/// An expected JSON value of one of the supported shapes.
#[derive(Clone)]
pub enum Expected {
    /// Text holding a JSON document. It is not re-quoted.
    RawText(String),
    /// Bytes holding a JSON document.
    RawBytes(Vec<u8>),
    /// A structured value encoded by the generic JSON encoder.
    Structured(Value),
    /// A value that renders its own JSON.
    Custom(Arc<dyn RenderJson>),
}

impl Expected {
    /// Expected JSON given as text.
    #[must_use]
    pub fn text(json: impl Into<String>) -> Self {
        Self::RawText(json.into())
    }

    /// Expected JSON given as bytes.
    #[must_use]
    pub fn bytes(json: impl Into<Vec<u8>>) -> Self {
        Self::RawBytes(json.into())
    }

    /// Encodes any serializable value.
    ///
    /// # Errors
    ///
    /// Returns a decode error for the expected side if the value cannot be
    /// represented as JSON (e.g. a map with non-string keys).
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self, AssertionError> {
        serde_json::to_value(value)
            .map(Self::Structured)
            .map_err(|e| AssertionError::decode(DecodeSubject::Expected, e.to_string()))
    }

    /// Wraps a self-rendering value.
    #[must_use]
    pub fn renderer(value: impl RenderJson + 'static) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Resolves the expected value into JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns a decode error if a structured or custom value fails to
    /// encode.
    pub fn resolve(&self) -> Result<Vec<u8>, AssertionError> {
        match self {
            Self::Custom(renderer) => renderer
                .render_json()
                .map_err(|e| AssertionError::decode(DecodeSubject::Expected, e)),
            Self::RawText(text) => Ok(text.as_bytes().to_vec()),
            Self::RawBytes(bytes) => Ok(bytes.clone()),
            Self::Structured(value) => serde_json::to_vec(value)
                .map_err(|e| AssertionError::decode(DecodeSubject::Expected, e.to_string())),
        }
    }

    /// Resolves and decodes the expected value.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the value does not resolve to valid JSON.
    pub fn canonicalize(&self) -> Result<CanonicalValue, AssertionError> {
        if let Self::Structured(value) = self {
            return Ok(CanonicalValue::from_json(value.clone()));
        }
        let bytes = self.resolve()?;
        Ok(CanonicalValue::decode(&bytes, DecodeSubject::Expected)?)
    }
}

impl fmt::Debug for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RawText(text) => f.debug_tuple("RawText").field(text).finish(),
            Self::RawBytes(bytes) => f.debug_tuple("RawBytes").field(&bytes.len()).finish(),
            Self::Structured(value) => f.debug_tuple("Structured").field(value).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for Expected {
    fn from(json: &str) -> Self {
        Self::text(json)
    }
}

impl From<String> for Expected {
    fn from(json: String) -> Self {
        Self::RawText(json)
    }
}

impl From<Vec<u8>> for Expected {
    fn from(json: Vec<u8>) -> Self {
        Self::RawBytes(json)
    }
}

impl From<&[u8]> for Expected {
    fn from(json: &[u8]) -> Self {
        Self::bytes(json)
    }
}

impl From<Value> for Expected {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

/// Compares a response body against an expected JSON value.
///
/// # Errors
///
/// Returns a decode error naming the failing side, or a
/// [`AssertionError::JsonMismatch`] carrying both canonical renderings.
pub fn json_equals(body: &[u8], expected: &Expected) -> AssertionResult {
    let have = CanonicalValue::decode(body, DecodeSubject::Body)?;
    let want = expected.canonicalize()?;
    if have == want {
        Ok(())
    } else {
        Err(AssertionError::JsonMismatch {
            have: have.to_string(),
            want: want.to_string(),
        })
    }
}
