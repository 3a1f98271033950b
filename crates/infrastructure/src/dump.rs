//! Plain-text dump of an exchange, shown next to failure reports.

use std::fmt::Write as _;

use base64::Engine;
use vouch_domain::{Body, Exchange, HeaderMap, ReportSettings};

/// Renders the request and response of an exchange.
#[derive(Debug, Clone, Default)]
pub struct ExchangeDump {
    settings: ReportSettings,
}

impl ExchangeDump {
    /// Creates a dumper with the given settings.
    #[must_use]
    pub const fn new(settings: ReportSettings) -> Self {
        Self { settings }
    }

    /// Renders the exchange.
    ///
    /// Bodies longer than the preview limit are truncated. Bodies that are
    /// not UTF-8 are shown base64 encoded.
    #[must_use]
    pub fn render(&self, exchange: &Exchange) -> String {
        let mut out = String::new();

        if self.settings.include_request {
            let request = exchange.request();
            let _ = writeln!(out, "--> {} {}", request.method(), request.url());
            write_headers(&mut out, request.headers());
            out.push('\n');
        }

        let response = exchange.response();
        let _ = writeln!(out, "<-- {}", response.status());
        write_headers(&mut out, response.headers());

        if !response.body().is_empty() {
            out.push('\n');
            self.write_body(&mut out, response.body());
            out.push('\n');
        }

        out
    }

    fn write_body(&self, out: &mut String, body: &Body) {
        let bytes = body.as_bytes();
        let mut end = bytes.len().min(self.settings.body_preview_limit);

        match std::str::from_utf8(bytes) {
            Ok(text) => {
                while !text.is_char_boundary(end) {
                    end -= 1;
                }
                out.push_str(&text[..end]);
            }
            Err(_) => {
                let _ = write!(
                    out,
                    "base64:{}",
                    base64::engine::general_purpose::STANDARD.encode(&bytes[..end])
                );
            }
        }

        if bytes.len() > end {
            let _ = write!(out, "... ({} more bytes)", bytes.len() - end);
        }
    }
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers.iter() {
        if !name.is_empty() {
            let _ = writeln!(out, "{name}: {value}");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vouch_domain::{RequestView, Response};

    use super::*;

    fn exchange(body: impl Into<Body>) -> Exchange {
        Exchange::new(
            Response::new(
                500,
                [("Content-Type", "application/json")].into_iter().collect(),
                body,
            ),
            RequestView::new("post", "http://example.com/items").with_header("Accept", "*/*"),
        )
    }

    #[test]
    fn test_render_full_exchange() {
        let dump = ExchangeDump::default().render(&exchange(r#"{"error":"boom"}"#));
        assert_eq!(
            dump,
            "--> POST http://example.com/items\n\
             Accept: */*\n\
             \n\
             <-- 500 Internal Server Error\n\
             Content-Type: application/json\n\
             \n\
             {\"error\":\"boom\"}\n"
        );
    }

    #[test]
    fn test_render_without_request() {
        let settings = ReportSettings {
            include_request: false,
            ..ReportSettings::default()
        };
        let dump = ExchangeDump::new(settings).render(&exchange(""));
        assert_eq!(dump, "<-- 500 Internal Server Error\nContent-Type: application/json\n");
    }

    #[test]
    fn test_render_truncates_body() {
        let settings = ReportSettings {
            body_preview_limit: 4,
            include_request: false,
            ..ReportSettings::default()
        };
        let dump = ExchangeDump::new(settings).render(&exchange("0123456789"));
        assert!(dump.ends_with("\n0123... (6 more bytes)\n"), "{dump}");
    }

    #[test]
    fn test_render_truncates_on_char_boundary() {
        let settings = ReportSettings {
            body_preview_limit: 2,
            include_request: false,
            ..ReportSettings::default()
        };
        let dump = ExchangeDump::new(settings).render(&exchange("héllo"));
        assert!(dump.ends_with("\nh... (5 more bytes)\n"), "{dump}");
    }

    #[test]
    fn test_render_binary_body_as_base64() {
        let settings = ReportSettings {
            include_request: false,
            ..ReportSettings::default()
        };
        let dump = ExchangeDump::new(settings).render(&exchange(vec![0xff, 0xfe, 0x00]));
        assert!(dump.ends_with("\nbase64://4A\n"), "{dump}");
    }
}
