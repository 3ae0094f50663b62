//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Translate the configured level into an `EnvFilter`
//! - Switch between console and JSON output
//!
//! # Design Decisions
//! - `RUST_LOG`, when set, takes precedence over the configured level
//! - `off` silences everything, including request tracing

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directive for a configured level name.
pub fn filter_directive(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        "off" => "off".to_string(),
        level => format!("erised={level},tower_http={level}"),
    }
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.log_level)));

    let json = config
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let console = (!config.json_logs)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(console)
        .init();
}
