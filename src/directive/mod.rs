//! Directive headers and their translation into a response specification.
//!
//! # Data Flow
//! ```text
//! Request headers
//!     → status.rs   (X-Erised-Status-Code → StatusCode)
//!     → encoding.rs (X-Erised-Content-Type → MIME type + Content-Encoding)
//!     → headers.rs  (X-Erised-Headers → extra response headers)
//!     → body.rs     (X-Erised-Data | X-Erised-Response-File → body source)
//!     → spec.rs     (ResponseSpec, immutable for the rest of the request)
//!     → http::response (applies the ResponseSpec to the wire)
//! ```
//!
//! # Design Decisions
//! - Each directive has its own parse function; nothing inspects header names generically
//! - Unparseable directives fall back to defaults instead of failing the request
//! - The response-file lookup outcome overrides the status directive

pub mod body;
pub mod encoding;
pub mod headers;
pub mod spec;
pub mod status;

pub use body::{resolve_body, BodySource, ResolvedBody, SearchOutcome, SearchRoot};
pub use encoding::Encoding;
pub use spec::ResponseSpec;
pub use status::{is_redirect_class, resolve_status};

pub const STATUS_CODE: &str = "x-erised-status-code";
pub const CONTENT_TYPE: &str = "x-erised-content-type";
pub const DATA: &str = "x-erised-data";
pub const HEADERS: &str = "x-erised-headers";
pub const LOCATION: &str = "x-erised-location";
pub const RESPONSE_DELAY: &str = "x-erised-response-delay";
pub const RESPONSE_FILE: &str = "x-erised-response-file";
