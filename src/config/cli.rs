//! Command-line flags.
//!
//! Flags override values read from `--config`, which override built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{read_config, ConfigError};
use crate::config::schema::ServerConfig;
use crate::config::validation::validate_config;

const DIRECTIVE_HELP: &str = "\
HTTP Headers:
  X-Erised-Content-Type       Sets the response Content-Type (json, xml, html, gzip, text)
  X-Erised-Data               Returns the same value in the response body
  X-Erised-Headers            Returns the value(s) in the response header(s). Values must be a JSON object
  X-Erised-Location           Sets the response Location when 300 <= X-Erised-Status-Code < 310
  X-Erised-Response-Delay     Number of milliseconds to wait before sending the response body
  X-Erised-Response-File      Returns the contents of file in the response body. If present, X-Erised-Data is ignored
  X-Erised-Status-Code        Sets the HTTP Status Code

Usage examples at https://github.com/EAddario/erised";

#[derive(Debug, Parser)]
#[command(name = "erised", version)]
#[command(about = "Simple http server to test arbitrary responses", long_about = None)]
#[command(after_help = DIRECTIVE_HELP)]
pub struct Cli {
    /// TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to a valid X.509 certificate file
    #[arg(long, value_name = "FILE")]
    pub cert: Option<String>,

    /// Path to a valid private key file
    #[arg(long, value_name = "FILE")]
    pub key: Option<String>,

    /// Use HTTPS instead of HTTP. A valid X.509 certificate and private key are required
    #[arg(long)]
    pub https: bool,

    /// Port to listen. Default is 8080 for HTTP and 8443 for HTTPS
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to search recursively for X-Erised-Response-File
    #[arg(long, value_name = "DIR")]
    pub path: Option<String>,

    /// Maximum duration in seconds for reading the request and committing headers
    #[arg(long, value_name = "SECS")]
    pub read: Option<u64>,

    /// Maximum duration in seconds before timing out response writes
    #[arg(long, value_name = "SECS")]
    pub write: Option<u64>,

    /// One of debug/info/warn/error/off
    #[arg(long)]
    pub level: Option<String>,

    /// Use JSON log format
    #[arg(long)]
    pub json: bool,

    /// Serve Prometheus metrics on this address (e.g. 127.0.0.1:9090)
    #[arg(long, value_name = "ADDR")]
    pub metrics: Option<String>,
}

impl Cli {
    /// Resolve the effective, validated configuration.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ServerConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply(self, config: &mut ServerConfig) {
        if let Some(cert) = self.cert {
            config.listener.cert_path = cert;
        }
        if let Some(key) = self.key {
            config.listener.key_path = key;
        }
        if self.https {
            config.listener.https = true;
        }
        if let Some(port) = self.port {
            config.listener.port = Some(port);
        }
        if let Some(path) = self.path {
            config.search.path = path;
        }
        if let Some(read) = self.read {
            config.timeouts.read_secs = read;
        }
        if let Some(write) = self.write {
            config.timeouts.write_secs = write;
        }
        if let Some(level) = self.level {
            config.observability.log_level = level;
        }
        if self.json {
            config.observability.json_logs = true;
        }
        if let Some(metrics) = self.metrics {
            config.observability.metrics_address = Some(metrics);
        }
    }
}
