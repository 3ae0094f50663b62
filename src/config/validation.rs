//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - TLS material present when HTTPS is requested
//! - Recognized log level, non-zero timeouts, parseable metrics address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - The search path is not checked here; an unreadable root answers 400 per request

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

pub const LOG_LEVELS: &[&str] = &["debug", "info", "warn", "error", "off"];

/// A single failed semantic check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("HTTPS requires a valid certificate and key file")]
    MissingTlsMaterial,

    #[error("unknown log level '{0}', expected one of debug/info/warn/error/off")]
    UnknownLogLevel(String),

    #[error("{0} timeout must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let listener = &config.listener;
    if listener.https && (listener.cert_path.is_empty() || listener.key_path.is_empty()) {
        errors.push(ValidationError::MissingTlsMaterial);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if config.timeouts.read_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("read"));
    }
    if config.timeouts.write_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("write"));
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
