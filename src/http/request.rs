//! Request identification and metadata.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID for every request
//! - Extract the request facts handlers log and reflect (protocol, peer, host, path)

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{header, HeaderValue, Method, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Makes `x-request-id` values from random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The parts of a request that get logged and echoed back.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub protocol: String,
    pub remote_addr: Option<SocketAddr>,
    pub method: Method,
    pub host: String,
    pub uri: String,
}

impl RequestMeta {
    pub fn of<B>(request: &Request<B>) -> Self {
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| request.uri().authority().map(|a| a.to_string()))
            .unwrap_or_default();

        Self {
            protocol: format!("{:?}", request.version()),
            remote_addr: request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr),
            method: request.method().clone(),
            host,
            uri: request.uri().to_string(),
        }
    }

    /// Peer address as `ip:port`, empty when the transport did not record one.
    pub fn remote(&self) -> String {
        self.remote_addr.map(|a| a.to_string()).unwrap_or_default()
    }

    /// Emit the per-route access event.
    pub fn log(&self, route: &'static str) {
        tracing::info!(
            protocol = %self.protocol,
            remote_address = %self.remote(),
            method = %self.method,
            host = %self.host,
            path = %self.uri,
            route,
            "Request received"
        );
    }
}
