//! Content type and transfer encoding resolution.

use std::io::Write;

use axum::body::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;

/// How the response body is labelled and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Text,
    Json,
    Xml,
    Html,
    Gzip,
}

impl Encoding {
    /// Resolve an `X-Erised-Content-Type` token. Unknown or absent tokens are text.
    pub fn from_token(token: &str) -> Self {
        match token {
            "json" => Encoding::Json,
            "xml" => Encoding::Xml,
            "html" => Encoding::Html,
            "gzip" => Encoding::Gzip,
            _ => Encoding::Text,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Encoding::Text => "text/plain",
            Encoding::Json => "application/json",
            Encoding::Xml => "application/xml",
            Encoding::Html => "text/html",
            Encoding::Gzip => "application/octet-stream",
        }
    }

    /// Value for the `Content-Encoding` header. Uncompressed bodies send none.
    pub fn content_encoding(self) -> Option<&'static str> {
        match self {
            Encoding::Gzip => Some("gzip"),
            _ => None,
        }
    }

    /// Short label used in logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            Encoding::Text => "text",
            Encoding::Json => "json",
            Encoding::Xml => "xml",
            Encoding::Html => "html",
            Encoding::Gzip => "gzip",
        }
    }

    /// Apply the byte transformation for this encoding.
    ///
    /// Only gzip transforms anything. The compressor is finished before the
    /// bytes are returned so the trailer is always present.
    pub fn encode(self, body: Bytes) -> std::io::Result<Bytes> {
        match self {
            Encoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::with_capacity(body.len() / 2 + 32), Compression::default());
                encoder.write_all(&body)?;
                encoder.flush()?;
                Ok(Bytes::from(encoder.finish()?))
            }
            _ => Ok(body),
        }
    }
}
