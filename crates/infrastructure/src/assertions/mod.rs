//! Builtin assertion library.
//!
//! Each assertion kind is a small struct holding its configured parameters
//! and implementing the [`Assertion`](vouch_application::Assertion) port.

mod body;
mod compile;
mod content_type;
mod custom;
mod header;
mod json;
mod pattern;
mod schema;
mod status;

pub use body::{BodyEquals, BodyLength, BodyMatch};
pub use compile::compile;
pub use content_type::{ContentType, content_type_pattern};
pub use custom::Predicate;
pub use header::{HeaderEquals, HeaderMatch, HeaderNotEquals, HeaderNotPresent, HeaderPresent, RedirectTo};
pub use json::{JsonEquals, OnJson};
pub use pattern::Pattern;
pub use schema::JsonSchema;
pub use status::{StatusEquals, StatusRange};

#[cfg(test)]
pub(crate) mod test_support {
    use vouch_domain::{Exchange, RequestView, Response};

    pub fn exchange(status: u16, headers: &[(&str, &str)], body: &str) -> Exchange {
        Exchange::new(
            Response::new(status, headers.iter().copied().collect(), body),
            RequestView::new("GET", "http://example.com/start"),
        )
    }

    pub fn with_body(body: &str) -> Exchange {
        exchange(200, &[], body)
    }

    pub fn with_headers(headers: &[(&str, &str)]) -> Exchange {
        exchange(200, headers, "")
    }
}
