//! Domain error types
//!
//! Every assertion produces either `Ok(())` or one [`AssertionError`]. The
//! variants follow the verdict taxonomy: transport failures, decode
//! failures, mismatches and usage errors.

use std::fmt;

use thiserror::Error;

/// Broad classification of an [`AssertionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request failed before any response existed.
    Transport,
    /// A body, expected value or schema could not be decoded as JSON.
    Decode,
    /// The observed value violated the expectation.
    Mismatch,
    /// The engine was misused by the test author.
    Usage,
}

/// The request failed before a response existed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    /// Creates a new transport error from any displayable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Which side of a JSON check failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeSubject {
    /// The actual response body.
    Body,
    /// The caller-supplied expected value.
    Expected,
    /// The caller-supplied JSON schema document.
    Schema,
}

impl fmt::Display for DecodeSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => f.write_str("response body"),
            Self::Expected => f.write_str("expected value"),
            Self::Schema => f.write_str("JSON schema"),
        }
    }
}

/// A JSON document could not be parsed or encoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to decode {subject} as JSON: {message}")]
pub struct DecodeError {
    /// The side that failed.
    pub subject: DecodeSubject,
    /// Parser message.
    pub message: String,
}

impl DecodeError {
    /// Creates a new decode error.
    #[must_use]
    pub fn new(subject: DecodeSubject, message: impl Into<String>) -> Self {
        Self {
            subject,
            message: message.into(),
        }
    }
}

/// Misuse of the engine. These are never soft test failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// An expectation was already created for this request.
    #[error("request {request} has already been tested: a request can be bound to one expectation only")]
    AlreadyTested {
        /// Identifier of the request.
        request: String,
    },

    /// No assertion is registered under the given name.
    #[error("no assertion registered under '{0}'")]
    UnknownAssertion(String),

    /// `run` was called on an expectation that already ran.
    #[error("expectation has already been run")]
    AlreadyRun,

    /// A regular expression failed to compile.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// A JSON schema could not be loaded or compiled.
    #[error("invalid JSON schema: {0}")]
    InvalidSchema(String),
}

/// The single failure surfaced by an assertion or an expectation run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssertionError {
    /// The exchange could not be performed.
    #[error("request error: {0}")]
    Transport(#[from] TransportError),

    /// A JSON document failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The observed value violated the expectation.
    #[error("{0}")]
    Mismatch(String),

    /// Two JSON documents decoded to different values.
    ///
    /// Both sides are re-serialized from their canonical form.
    #[error("JSON mismatch:\n\thave: {have}\n\twant: {want}")]
    JsonMismatch {
        /// Canonical rendering of the response body.
        have: String,
        /// Canonical rendering of the expected value.
        want: String,
    },

    /// Every violation reported by one schema validation pass.
    #[error("{}", format_violations(.0))]
    SchemaViolations(Vec<String>),

    /// The engine was misused.
    #[error(transparent)]
    Usage(#[from] UsageError),
}

impl AssertionError {
    /// Creates a mismatch error.
    #[must_use]
    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::Mismatch(message.into())
    }

    /// Creates a decode error for the given subject.
    #[must_use]
    pub fn decode(subject: DecodeSubject, message: impl Into<String>) -> Self {
        Self::Decode(DecodeError::new(subject, message))
    }

    /// Returns the taxonomy class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Mismatch(_) | Self::JsonMismatch { .. } | Self::SchemaViolations(_) => {
                ErrorKind::Mismatch
            }
            Self::Usage(_) => ErrorKind::Usage,
        }
    }

    /// Returns true if this error signals misuse rather than a test failure.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

fn format_violations(violations: &[String]) -> String {
    let mut message = String::from("JSON document is not valid for the following reasons:");
    for violation in violations {
        message.push_str("\n\t- ");
        message.push_str(violation);
    }
    message
}

/// Result type for a single assertion evaluation.
pub type AssertionResult = Result<(), AssertionError>;
