//! Response writing.
//!
//! # Responsibilities
//! - Apply a `ResponseSpec` to the wire in a fixed order
//! - Delay and encode the body only after status and headers are committed
//! - Log body failures; the committed status never changes
//!
//! # Design Decisions
//! - Headers are committed when the handler returns; the body is a stream
//!   polled afterwards, so the delay never holds back the status line
//! - The delay suspends only this request's body future
//! - A body failure aborts the connection instead of sending a partial body

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use futures_util::stream;
use thiserror::Error;

use crate::directive::{is_redirect_class, resolve_body, Encoding, ResolvedBody, ResponseSpec};
use crate::observability::metrics;

/// Failures after the headers have been committed.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The body compressor failed to write or finish.
    #[error("body compression failed: {0}")]
    Compression(#[from] std::io::Error),

    /// Delay plus encoding did not finish inside the write timeout.
    #[error("body not written within {0:?}")]
    Timeout(Duration),
}

/// Resolve the body for `spec` and write the response.
pub async fn respond(spec: ResponseSpec, write_timeout: Duration) -> Response {
    let resolved = resolve_body(&spec.body_source).await;
    write_response(spec, resolved, write_timeout)
}

/// Build the response for a spec whose body has been resolved.
///
/// Order: content headers, caller headers, `Location`, commit, delay, body.
pub fn write_response(spec: ResponseSpec, resolved: ResolvedBody, write_timeout: Duration) -> Response {
    let status = resolved.status_override.unwrap_or(spec.status);
    let headers = build_headers(&spec, status);

    metrics::record_response(status, spec.encoding, spec.delay);

    let body = deliver(status, spec.encoding, spec.delay, resolved.content, write_timeout);
    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

fn build_headers(spec: &ResponseSpec, status: StatusCode) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(spec.encoding.mime_type()));
    if let Some(coding) = spec.encoding.content_encoding() {
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static(coding));
    }

    for (name, value) in spec.extra_headers.iter() {
        headers.insert(name.clone(), value.clone());
    }

    // Location belongs to the redirect directive alone.
    if is_redirect_class(status) {
        let location = spec
            .location
            .clone()
            .unwrap_or_else(|| HeaderValue::from_static(""));
        headers.insert(header::LOCATION, location);
    } else {
        headers.remove(header::LOCATION);
    }

    headers
}

fn deliver(
    status: StatusCode,
    encoding: Encoding,
    delay: Duration,
    content: Bytes,
    write_timeout: Duration,
) -> Body {
    let body = stream::once(async move {
        let mut delivery = Delivery::new(status, encoding);

        let work = async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            encoding.encode(content).map_err(WriteError::from)
        };
        let result = match tokio::time::timeout(write_timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(WriteError::Timeout(write_timeout)),
        };

        delivery.finish(&result);
        result
    });
    Body::from_stream(body)
}

/// Tracks one body from header commit to its terminal state.
///
/// Dropped before `finish` means the peer went away mid-delay.
struct Delivery {
    status: StatusCode,
    encoding: Encoding,
    finished: bool,
}

impl Delivery {
    fn new(status: StatusCode, encoding: Encoding) -> Self {
        Self {
            status,
            encoding,
            finished: false,
        }
    }

    fn finish(&mut self, result: &Result<Bytes, WriteError>) {
        self.finished = true;
        match result {
            Ok(bytes) => tracing::trace!(
                status = self.status.as_u16(),
                encoding = self.encoding.label(),
                bytes = bytes.len(),
                "Body written"
            ),
            Err(e) => tracing::error!(
                status = self.status.as_u16(),
                encoding = self.encoding.label(),
                error = %e,
                "Body write failed"
            ),
        }
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(status = self.status.as_u16(), "Body abandoned before it was written");
        }
    }
}
