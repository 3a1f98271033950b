//! Vouch Application - Expectations, registry and ports
//!
//! This crate defines the application layer with:
//! - Port traits (assertions, exchange providers, failure sinks)
//! - The single-use expectation runner
//! - The name-indexed assertion registry

pub mod expectation;
pub mod ports;
pub mod registry;

pub use expectation::{Expectation, ExpectationState, PendingExchange};
pub use ports::{Assertion, ExchangeProvider, FailureSink, FnAssertion};
pub use registry::AssertionRegistry;
