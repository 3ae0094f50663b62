//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file and
//! default every field, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_HTTPS_PORT: u16 = 8443;

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Response file search settings.
    pub search: SearchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host or IP to bind.
    pub host: String,

    /// Port to listen on. Unset means 8080 for HTTP, 8443 for HTTPS.
    pub port: Option<u16>,

    /// Serve HTTPS instead of HTTP.
    pub https: bool,

    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: None,
            https: false,
            cert_path: String::new(),
            key_path: String::new(),
        }
    }
}

impl ListenerConfig {
    pub fn effective_port(&self) -> u16 {
        match (self.port, self.https) {
            (Some(port), _) => port,
            (None, false) => DEFAULT_HTTP_PORT,
            (None, true) => DEFAULT_HTTPS_PORT,
        }
    }

    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.effective_port())
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Time allowed from request receipt until headers are committed, in seconds.
    pub read_secs: u64,

    /// Time allowed for the delayed body to be produced, in seconds.
    pub write_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            read_secs: 5,
            write_secs: 10,
        }
    }
}

/// Response file search configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Directory searched recursively for `X-Erised-Response-File`.
    /// Empty disables file lookup.
    pub path: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error, off).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Prometheus endpoint bind address. Unset disables metrics export.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        let mut listener = ListenerConfig::default();
        assert_eq!(listener.bind_address(), "0.0.0.0:8080");

        listener.https = true;
        assert_eq!(listener.effective_port(), 8443);

        listener.port = Some(9000);
        assert_eq!(listener.effective_port(), 9000);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            port = 9090

            [search]
            path = "fixtures"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.effective_port(), 9090);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.search.path, "fixtures");
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.timeouts.write_secs, 10);
    }
}
