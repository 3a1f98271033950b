//! The completed exchange under test.
//!
//! An [`Exchange`] pairs the immutable [`Response`] with a read-only
//! [`RequestView`] of the request that produced it.

mod body;
mod headers;
mod request;
mod response;

pub use body::Body;
pub use headers::HeaderMap;
pub use request::RequestView;
pub use response::{Response, StatusCode};

/// A completed request/response pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    response: Response,
    request: RequestView,
}

impl Exchange {
    /// Creates a new exchange.
    #[must_use]
    pub const fn new(response: Response, request: RequestView) -> Self {
        Self { response, request }
    }

    /// Creates an exchange for a response whose request is unknown.
    ///
    /// The request view is an empty `GET`.
    #[must_use]
    pub fn from_response(response: Response) -> Self {
        Self::new(response, RequestView::new("GET", ""))
    }

    /// Returns the response.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }

    /// Returns the request.
    #[must_use]
    pub const fn request(&self) -> &RequestView {
        &self.request
    }
}
