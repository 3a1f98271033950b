//! Vouch Domain - Core expectation types
//!
//! This crate defines the data model of the Vouch expectation engine:
//! the completed exchange under test, the canonical JSON form used for
//! equality, the declarative assertion forms, and the error taxonomy.
//! All types here are pure Rust with no I/O dependencies.

pub mod assertion;
pub mod canonical;
pub mod error;
pub mod exchange;
pub mod settings;

pub use assertion::{AssertionSpec, StatusClass, StatusExpectation};
pub use canonical::{CanonicalValue, Expected, RenderJson, json_equals};
pub use error::{
    AssertionError, AssertionResult, DecodeError, DecodeSubject, ErrorKind, TransportError,
    UsageError,
};
pub use exchange::{Body, Exchange, HeaderMap, RequestView, Response, StatusCode};
pub use settings::ReportSettings;
