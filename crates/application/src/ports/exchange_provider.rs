//! Exchange provider port

use std::future::Future;

use vouch_domain::{Exchange, TransportError};

/// Port for performing the request under test.
///
/// This trait abstracts the transport, allowing the expectation runner to
/// be independent of specific HTTP libraries. The runner calls `execute`
/// at most once per [`PendingExchange`](crate::PendingExchange).
pub trait ExchangeProvider: Send + Sync {
    /// Performs the request and returns the completed exchange with a fully
    /// buffered body.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response was received.
    fn execute(&self) -> impl Future<Output = Result<Exchange, TransportError>> + Send;
}
