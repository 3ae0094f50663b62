//! Metrics collection and exposition.
//!
//! # Metrics
//! - `erised_requests_total` (counter): requests by route
//! - `erised_responses_total` (counter): responses by status and content type
//! - `erised_response_delay_seconds` (histogram): requested artificial delay
//!
//! Recording is a no-op until an exporter is installed.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::directive::Encoding;

/// Install the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(route: &'static str) {
    metrics::counter!("erised_requests_total", "route" => route).increment(1);
}

pub fn record_response(status: StatusCode, encoding: Encoding, delay: Duration) {
    metrics::counter!(
        "erised_responses_total",
        "status" => status.as_u16().to_string(),
        "content_type" => encoding.label()
    )
    .increment(1);

    if !delay.is_zero() {
        metrics::histogram!("erised_response_delay_seconds").record(delay.as_secs_f64());
    }
}
