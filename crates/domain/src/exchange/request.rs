//! Read-only request view.

use url::Url;

use super::HeaderMap;

/// The request side of an exchange, as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestView {
    method: String,
    url: String,
    headers: HeaderMap,
}

impl RequestView {
    /// Creates a request view. The method is stored upper-cased.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            url: url.into(),
            headers: HeaderMap::new(),
        }
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replaces the headers (builder pattern).
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the URL as sent.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the URL parsed, if it is absolute and well formed.
    #[must_use]
    pub fn parsed_url(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
