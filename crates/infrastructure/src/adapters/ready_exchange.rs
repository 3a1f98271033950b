//! Provider for an exchange that already happened.

use vouch_application::ExchangeProvider;
use vouch_domain::{Exchange, Response, TransportError};

/// Hands out a prepared exchange.
///
/// Useful when the response was obtained elsewhere, or in tests.
#[derive(Debug, Clone)]
pub struct ReadyExchange(Exchange);

impl ReadyExchange {
    /// Wraps a completed exchange.
    #[must_use]
    pub const fn new(exchange: Exchange) -> Self {
        Self(exchange)
    }

    /// Wraps a bare response with an empty `GET` request view.
    #[must_use]
    pub fn from_response(response: Response) -> Self {
        Self(Exchange::from_response(response))
    }
}

impl ExchangeProvider for ReadyExchange {
    async fn execute(&self) -> Result<Exchange, TransportError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vouch_domain::HeaderMap;

    use super::*;

    #[tokio::test]
    async fn test_ready_exchange() {
        let provider = ReadyExchange::from_response(Response::new(204, HeaderMap::new(), ""));
        let exchange = provider.execute().await.unwrap();
        assert_eq!(exchange.response().status().as_u16(), 204);
        assert_eq!(exchange.request().method(), "GET");
    }
}
