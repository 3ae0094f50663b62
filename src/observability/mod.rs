//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the response writer produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr (console or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) is attached by the HTTP layer and shows up in trace spans
//! - Metrics are cheap no-ops when no exporter is installed

pub mod logging;
pub mod metrics;
