//! Fluent builders for the builtin assertions.
//!
//! ```ignore
//! let mut expect = pending.expect(sink)?;
//! expect.status(200).content_type("json").json_equals(r#"{"ok":true}"#);
//! expect.run().await?;
//! ```

use std::path::Path;

use serde_json::Value;
use vouch_application::{ExchangeProvider, Expectation};
use vouch_domain::{AssertionResult, Expected, RequestView, Response};

use crate::assertions::{
    BodyEquals, BodyLength, BodyMatch, ContentType, HeaderEquals, HeaderMatch, HeaderNotEquals,
    HeaderNotPresent, HeaderPresent, JsonEquals, JsonSchema, OnJson, Predicate, RedirectTo,
    StatusEquals, StatusRange,
};

/// Extension trait adding one method per builtin assertion.
pub trait ExpectExt {
    /// Status code equals `code`.
    fn status(&mut self, code: u16) -> &mut Self;
    /// Status code in 200-399.
    fn status_ok(&mut self) -> &mut Self;
    /// Status code in 400-599.
    fn status_error(&mut self) -> &mut Self;
    /// Status code in 400-499.
    fn status_client_error(&mut self) -> &mut Self;
    /// Status code in 500-599.
    fn status_server_error(&mut self) -> &mut Self;
    /// Status code is 301 or 302.
    fn status_redirect(&mut self) -> &mut Self;
    /// Status code in `[min, max]`.
    fn status_range(&mut self, min: u16, max: u16) -> &mut Self;
    /// `Content-Type` matches an alias or regex.
    fn content_type(&mut self, kind: &str) -> &mut Self;
    /// Header value contains a regex match.
    fn header(&mut self, name: &str, pattern: &str) -> &mut Self;
    /// Header value equals `value`.
    fn header_equals(&mut self, name: &str, value: &str) -> &mut Self;
    /// Header value differs from `value`.
    fn header_not_equals(&mut self, name: &str, value: &str) -> &mut Self;
    /// Header has a non-empty value.
    fn header_present(&mut self, name: &str) -> &mut Self;
    /// Header is absent or empty.
    fn header_not_present(&mut self, name: &str) -> &mut Self;
    /// `Location` is set and matches a regex.
    fn redirect_to(&mut self, pattern: &str) -> &mut Self;
    /// Body equals `text` modulo one trailing newline.
    fn body_equals(&mut self, text: &str) -> &mut Self;
    /// Body contains a regex match.
    fn body_match(&mut self, pattern: &str) -> &mut Self;
    /// Body length in bytes.
    fn body_length(&mut self, length: usize) -> &mut Self;
    /// Body decodes to the same JSON as `expected`.
    fn json_equals(&mut self, expected: impl Into<Expected>) -> &mut Self;
    /// Body validates against a schema given inline or as a path.
    fn json_schema(&mut self, schema: &str) -> &mut Self;
    /// Body validates against a schema file.
    fn json_schema_file(&mut self, path: impl AsRef<Path>) -> &mut Self;
    /// Decoded JSON body is handed to `func`.
    fn on_json<F>(&mut self, func: F) -> &mut Self
    where
        F: Fn(&Value) -> AssertionResult + Send + Sync + 'static;
    /// Arbitrary check over the response and request.
    fn assert_fn<F>(&mut self, name: &str, func: F) -> &mut Self
    where
        F: Fn(&Response, &RequestView) -> AssertionResult + Send + Sync + 'static;
}

impl<P: ExchangeProvider> ExpectExt for Expectation<P> {
    fn status(&mut self, code: u16) -> &mut Self {
        self.add(StatusEquals::new(code))
    }

    fn status_ok(&mut self) -> &mut Self {
        self.add(StatusRange::ok())
    }

    fn status_error(&mut self) -> &mut Self {
        self.add(StatusRange::error())
    }

    fn status_client_error(&mut self) -> &mut Self {
        self.add(StatusRange::client_error())
    }

    fn status_server_error(&mut self) -> &mut Self {
        self.add(StatusRange::server_error())
    }

    fn status_redirect(&mut self) -> &mut Self {
        self.add(StatusRange::redirect())
    }

    fn status_range(&mut self, min: u16, max: u16) -> &mut Self {
        self.add(StatusRange::new(min, max))
    }

    fn content_type(&mut self, kind: &str) -> &mut Self {
        self.add(ContentType::new(kind))
    }

    fn header(&mut self, name: &str, pattern: &str) -> &mut Self {
        self.add(HeaderMatch::new(name, pattern))
    }

    fn header_equals(&mut self, name: &str, value: &str) -> &mut Self {
        self.add(HeaderEquals::new(name, value))
    }

    fn header_not_equals(&mut self, name: &str, value: &str) -> &mut Self {
        self.add(HeaderNotEquals::new(name, value))
    }

    fn header_present(&mut self, name: &str) -> &mut Self {
        self.add(HeaderPresent::new(name))
    }

    fn header_not_present(&mut self, name: &str) -> &mut Self {
        self.add(HeaderNotPresent::new(name))
    }

    fn redirect_to(&mut self, pattern: &str) -> &mut Self {
        self.add(RedirectTo::new(pattern))
    }

    fn body_equals(&mut self, text: &str) -> &mut Self {
        self.add(BodyEquals::new(text))
    }

    fn body_match(&mut self, pattern: &str) -> &mut Self {
        self.add(BodyMatch::new(pattern))
    }

    fn body_length(&mut self, length: usize) -> &mut Self {
        self.add(BodyLength::new(length))
    }

    fn json_equals(&mut self, expected: impl Into<Expected>) -> &mut Self {
        self.add(JsonEquals::new(expected))
    }

    fn json_schema(&mut self, schema: &str) -> &mut Self {
        self.add(JsonSchema::new(schema))
    }

    fn json_schema_file(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.add(JsonSchema::from_file(path))
    }

    fn on_json<F>(&mut self, func: F) -> &mut Self
    where
        F: Fn(&Value) -> AssertionResult + Send + Sync + 'static,
    {
        self.add(OnJson::new(func))
    }

    fn assert_fn<F>(&mut self, name: &str, func: F) -> &mut Self
    where
        F: Fn(&Response, &RequestView) -> AssertionResult + Send + Sync + 'static,
    {
        self.add(Predicate::new(name, func))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vouch_application::PendingExchange;
    use vouch_domain::{AssertionError, Exchange};

    use super::*;
    use crate::adapters::ReadyExchange;
    use crate::sinks::RecordingSink;

    fn pending(exchange: Exchange) -> PendingExchange<ReadyExchange> {
        PendingExchange::new(ReadyExchange::new(exchange))
    }

    fn json_exchange() -> Exchange {
        Exchange::new(
            Response::new(
                200,
                [("Content-Type", "application/json"), ("Server", "nginx")]
                    .into_iter()
                    .collect(),
                r#"{"name":"vouch","tags":["a","b"]}"#,
            ),
            RequestView::new("GET", "http://example.com/items"),
        )
    }

    #[tokio::test]
    async fn test_fluent_chain_passes() {
        let sink = Arc::new(RecordingSink::new());
        let pending = pending(json_exchange());
        let mut expect = pending.expect(sink.clone()).unwrap();

        expect
            .status(200)
            .status_ok()
            .content_type("json")
            .header("Server", "ngi")
            .header_equals("server", "nginx")
            .header_not_equals("Server", "apache")
            .header_present("Server")
            .header_not_present("Location")
            .body_match("vouch")
            .json_equals(json!({"tags": ["a", "b"], "name": "vouch"}))
            .json_schema(r#"{"type":"object","required":["name"]}"#)
            .on_json(|value| {
                if value["tags"].as_array().is_some_and(|t| t.len() == 2) {
                    Ok(())
                } else {
                    Err(AssertionError::mismatch("two tags expected"))
                }
            })
            .assert_fn("GET only", |_res, req| {
                if req.method() == "GET" {
                    Ok(())
                } else {
                    Err(AssertionError::mismatch("unexpected method"))
                }
            });
        assert_eq!(expect.len(), 13);

        expect.run().await.unwrap();
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_fluent_chain_reports_first_failure() {
        let sink = Arc::new(RecordingSink::new());
        let pending = pending(json_exchange());
        let mut expect = pending.expect(sink.clone()).unwrap();

        expect.status(200).status_client_error().body_length(0);

        let err = expect.run().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status code outside the given range: 200 not in 400-499"
        );
        assert_eq!(sink.messages(), vec![err.to_string()]);
    }

    #[tokio::test]
    async fn test_redirect_builders() {
        let exchange = Exchange::new(
            Response::new(302, [("Location", "/login")].into_iter().collect(), ""),
            RequestView::new("POST", "http://example.com/session"),
        );
        let sink = Arc::new(RecordingSink::new());
        let pending = pending(exchange);
        let mut expect = pending.expect(sink).unwrap();

        expect
            .status_redirect()
            .status_range(300, 399)
            .redirect_to("^/login$")
            .body_equals("")
            .body_length(0);

        expect.run().await.unwrap();
    }
}
