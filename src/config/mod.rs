//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file, --config)
//!     → cli.rs (command-line flags override)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{read_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, SearchConfig, ServerConfig, TimeoutConfig};
