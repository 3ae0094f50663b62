//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, request ID, trace span, read timeout)
//!     → landing route: directive::ResponseSpec::from_headers
//!       /erised/* routes: reflect.rs
//!     → response.rs (headers committed, delay, body encoding)
//!     → Send to client
//! ```

pub mod reflect;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestMeta, UuidRequestId, X_REQUEST_ID};
pub use response::{respond, write_response, WriteError};
pub use server::{AppState, HttpServer};
