//! Erised: an HTTP server that answers with whatever response the client asks for.

pub mod config;
pub mod directive;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
