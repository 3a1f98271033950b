//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the expectation runner and the
//! outside world. Assertions, exchange providers and failure sinks are
//! implemented by adapters in the infrastructure layer or by test code.

mod assertion;
mod exchange_provider;
mod failure_sink;

pub use assertion::{Assertion, FnAssertion};
pub use exchange_provider::ExchangeProvider;
pub use failure_sink::FailureSink;
