//! Directive parsing into a typed response specification.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, StatusCode};

use super::body::{BodySource, SearchRoot};
use super::encoding::Encoding;
use super::headers::parse_extra_headers;
use super::status::resolve_status;
use super::{CONTENT_TYPE, DATA, HEADERS, LOCATION, RESPONSE_DELAY, RESPONSE_FILE, STATUS_CODE};

/// Everything needed to produce one response, built once per request.
#[derive(Debug, Clone)]
pub struct ResponseSpec {
    /// Status requested by the caller. A file lookup outcome replaces it.
    pub status: StatusCode,
    pub content_type_token: String,
    pub encoding: Encoding,
    pub extra_headers: HeaderMap,
    /// Redirect target. Only used when the final status is redirect-class.
    pub location: Option<HeaderValue>,
    pub delay: Duration,
    pub body_source: BodySource,
}

impl ResponseSpec {
    /// Build the specification from the request's directive headers.
    pub fn from_headers(headers: &HeaderMap, search_root: Option<&SearchRoot>) -> Self {
        let content_type_token = header_str(headers, CONTENT_TYPE).to_string();
        let spec = Self {
            status: parse_status(headers),
            encoding: Encoding::from_token(&content_type_token),
            content_type_token,
            extra_headers: parse_extra_headers(header_str(headers, HEADERS)),
            location: headers.get(LOCATION).cloned(),
            delay: parse_delay(headers),
            body_source: parse_body_source(headers, search_root),
        };

        tracing::debug!(
            status = spec.status.as_u16(),
            content_type = %spec.content_type_token,
            extra_headers = spec.extra_headers.len(),
            location = ?spec.location,
            delay_ms = spec.delay.as_millis() as u64,
            body_source = ?spec.body_source,
            "Directives parsed"
        );

        spec
    }

    /// A plain 200 response with a fixed body, used by the diagnostic routes.
    pub fn fixed(encoding: Encoding, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type_token: encoding.label().to_string(),
            encoding,
            extra_headers: HeaderMap::new(),
            location: None,
            delay: Duration::ZERO,
            body_source: BodySource::Literal(body.into()),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `X-Erised-Status-Code`, 200 when absent or unrecognized.
pub fn parse_status(headers: &HeaderMap) -> StatusCode {
    resolve_status(header_str(headers, STATUS_CODE))
}

/// `X-Erised-Response-Delay` in milliseconds. Anything but a positive integer means no delay.
pub fn parse_delay(headers: &HeaderMap) -> Duration {
    match header_str(headers, RESPONSE_DELAY).parse::<i64>() {
        Ok(ms) if ms > 0 => Duration::from_millis(ms as u64),
        _ => Duration::ZERO,
    }
}

/// `X-Erised-Response-File` when a root is configured, otherwise `X-Erised-Data`.
pub fn parse_body_source(headers: &HeaderMap, search_root: Option<&SearchRoot>) -> BodySource {
    let data = headers
        .get(DATA)
        .map(|v| Bytes::copy_from_slice(v.as_bytes()))
        .unwrap_or_default();
    BodySource::select(data, header_str(headers, RESPONSE_FILE), search_root)
}
