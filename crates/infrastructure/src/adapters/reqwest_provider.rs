//! Exchange provider backed by reqwest.

use reqwest::{Client, Request, RequestBuilder};
use tracing::debug;
use vouch_application::ExchangeProvider;
use vouch_domain::{Exchange, HeaderMap, RequestView, Response, TransportError};

/// Sends one prepared request with a reqwest client.
///
/// The request is cloned on every call, so requests with a streaming body
/// cannot be executed.
#[derive(Debug)]
pub struct ReqwestExchangeProvider {
    client: Client,
    request: Request,
}

impl ReqwestExchangeProvider {
    /// Creates a provider for `request`.
    #[must_use]
    pub const fn new(client: Client, request: Request) -> Self {
        Self { client, request }
    }

    /// Creates a provider from a request builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder holds an invalid request.
    pub fn from_builder(builder: RequestBuilder) -> Result<Self, TransportError> {
        let (client, request) = builder.build_split();
        let request = request.map_err(map_error)?;
        Ok(Self::new(client, request))
    }

    /// Creates a `GET` provider with a default client.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the client cannot be built.
    pub fn get(url: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("vouch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_error)?;
        Self::from_builder(client.get(url))
    }

    /// Returns the read-only view of the request.
    #[must_use]
    pub fn request_view(&self) -> RequestView {
        request_view(&self.request)
    }
}

impl ExchangeProvider for ReqwestExchangeProvider {
    async fn execute(&self) -> Result<Exchange, TransportError> {
        let request = self
            .request
            .try_clone()
            .ok_or_else(|| TransportError::new("request body cannot be replayed"))?;
        let view = request_view(&request);

        debug!(method = %view.method(), url = %view.url(), "Sending request");
        let response = self.client.execute(request).await.map_err(map_error)?;
        exchange_from_response(response, view).await
    }
}

/// Buffers a reqwest response into an [`Exchange`].
///
/// Header values that are not valid UTF-8 are converted lossily.
///
/// # Errors
///
/// Returns an error if the body cannot be read.
pub async fn exchange_from_response(
    response: reqwest::Response,
    request: RequestView,
) -> Result<Exchange, TransportError> {
    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());
    let body = response
        .bytes()
        .await
        .map_err(|e| TransportError::new(format!("failed to read body: {e}")))?;

    debug!(status, bytes = body.len(), "Response received");
    Ok(Exchange::new(
        Response::new(status, headers, body.to_vec()),
        request,
    ))
}

fn request_view(request: &Request) -> RequestView {
    RequestView::new(request.method().as_str(), request.url().as_str())
        .with_headers(collect_headers(request.headers()))
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> HeaderMap {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn map_error(error: reqwest::Error) -> TransportError {
    let target = error
        .url()
        .map_or_else(String::new, |url| format!(" ({url})"));
    if error.is_timeout() {
        TransportError::new(format!("request timed out{target}"))
    } else if error.is_connect() {
        TransportError::new(format!("connection failed{target}: {error}"))
    } else if error.is_redirect() {
        TransportError::new(format!("too many redirects{target}"))
    } else {
        TransportError::new(error.to_string())
    }
}
