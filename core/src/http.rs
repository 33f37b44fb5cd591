//! Transport-level request and response values.
//!
//! # Design
//! A `TransportRequest` is the fully resolved form of a `RequestDescriptor`:
//! an absolute, percent-encoded URL plus the method. It is produced fresh for
//! every call by the URL builder and handed to a `Transport`, which answers
//! with a `RawExchange` mirroring what a network stack reports: optional
//! bytes, an optional status line and an optional transport error. Nothing in
//! here interprets the exchange; that is the decoder's job.

use std::fmt;

use bytes::Bytes;
use url::Url;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready for a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: Url,
    pub method: HttpMethod,
}

/// Everything a transport observed for one exchange.
///
/// Mirrors the `(bytes?, response?, error?)` triple of callback-style HTTP
/// stacks. Any combination is representable; the decoder decides which one
/// wins.
#[derive(Debug, Default)]
pub struct RawExchange {
    pub body: Option<Bytes>,
    pub status: Option<u16>,
    pub error: Option<TransportError>,
}

impl RawExchange {
    /// A completed exchange carrying `body`.
    pub fn success(body: impl Into<Bytes>) -> Self {
        Self {
            body: Some(body.into()),
            status: Some(200),
            error: None,
        }
    }

    /// An exchange that failed at the transport level.
    pub fn failed(error: TransportError) -> Self {
        Self {
            body: None,
            status: None,
            error: Some(error),
        }
    }

    /// No bytes, no status, no error.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}
