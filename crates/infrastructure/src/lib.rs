//! Vouch Infrastructure - Assertions, sinks and adapters
//!
//! This crate provides the builtin assertion library and concrete
//! implementations of the ports defined in the application layer.

pub mod adapters;
pub mod assertions;
pub mod dump;
pub mod expect_ext;
pub mod sinks;
pub mod suite;

pub use adapters::{ReadyExchange, ReqwestExchangeProvider, exchange_from_response};
pub use assertions::{
    BodyEquals, BodyLength, BodyMatch, ContentType, HeaderEquals, HeaderMatch, HeaderNotEquals,
    HeaderNotPresent, HeaderPresent, JsonEquals, JsonSchema, OnJson, Pattern, Predicate,
    RedirectTo, StatusEquals, StatusRange, compile,
};
pub use dump::ExchangeDump;
pub use expect_ext::ExpectExt;
pub use sinks::{DumpingSink, PanicSink, RecordingSink, TracingSink};
pub use suite::{SuiteError, SuiteFile};
