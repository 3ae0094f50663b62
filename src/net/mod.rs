//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Plain HTTP:  tokio TcpListener → axum::serve
//! HTTPS:       tls.rs (PEM cert + key) → axum-server rustls acceptor
//! ```

pub mod tls;

pub use tls::load_tls_config;
