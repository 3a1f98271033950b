//! Exchange provider adapters

mod ready_exchange;
mod reqwest_provider;

pub use ready_exchange::ReadyExchange;
pub use reqwest_provider::{ReqwestExchangeProvider, exchange_from_response};
