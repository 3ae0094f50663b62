//! Caller-supplied response headers (`X-Erised-Headers`).
//!
//! # Responsibilities
//! - Parse the directive as a JSON object of header name to value
//! - Render non-string JSON values as their JSON text
//! - Produce a header map with one value per name (set, not append)
//!
//! # Design Decisions
//! - Malformed JSON degrades to no extra headers; the request still succeeds
//! - Entries that are not valid HTTP header names or values are skipped individually

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

/// Parse an `X-Erised-Headers` directive into the headers to inject.
pub fn parse_extra_headers(raw: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if raw.is_empty() {
        return headers;
    }

    let entries: Map<String, Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed X-Erised-Headers directive");
            return headers;
        }
    };

    for (name, value) in entries {
        let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
            tracing::warn!(header = %name, "Skipping invalid header name");
            continue;
        };
        let Ok(header_value) = HeaderValue::from_str(&value_text(&value)) else {
            tracing::warn!(header = %name, "Skipping invalid header value");
            continue;
        };
        headers.insert(header_name, header_value);
    }

    headers
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
