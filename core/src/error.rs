//! Error types for the networking client.
//!
//! # Design
//! The taxonomy is deliberately coarse: URL composition failures, everything
//! that went wrong during or after the exchange, and an empty response.
//! Transport failures and decode failures both land in `Request`; callers
//! that care tell them apart by downcasting `cause()` to `TransportError` or
//! `serde_json::Error`. Causes are held behind an `Arc` so errors stay
//! `Clone` and can be stored in observable state.

use std::error::Error;
use std::sync::Arc;

use thiserror::Error;

pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Every failure a call can produce. Each kind is terminal for that call.
#[derive(Debug, Clone, Error)]
pub enum NetworkingError {
    /// Scheme, host and path could not be composed into an absolute URL.
    /// No network call was made.
    #[error("invalid URL: scheme = {scheme}; host = {host}; path = {path}")]
    InvalidUrl {
        scheme: String,
        host: String,
        path: String,
    },

    /// The transport failed, or the response bytes did not decode.
    #[error("request failed: {cause}")]
    Request {
        #[source]
        cause: SharedError,
    },

    /// The exchange succeeded but carried no body.
    #[error("no data returned from request")]
    NoData,
}

impl NetworkingError {
    pub fn request(cause: impl Error + Send + Sync + 'static) -> Self {
        NetworkingError::Request {
            cause: Arc::new(cause),
        }
    }

    /// The wrapped cause of a `Request` error.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            NetworkingError::Request { cause } => Some(cause.as_ref()),
            _ => None,
        }
    }

    /// True when the cause is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        self.cause()
            .is_some_and(|cause| cause.downcast_ref::<TransportError>().is_some())
    }

    /// True when the cause is a JSON decode failure.
    pub fn is_decode(&self) -> bool {
        self.cause()
            .is_some_and(|cause| cause.downcast_ref::<serde_json::Error>().is_some())
    }
}

/// A failure reported by a `Transport` implementation.
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct TransportError(SharedError);

impl TransportError {
    #[inline]
    pub fn new(e: impl Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(e))
    }

    /// A transport error carrying only a message. Mostly useful to test
    /// doubles.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::new(Message(msg.into()))
    }

    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl From<BoxError> for TransportError {
    fn from(e: BoxError) -> Self {
        Self(Arc::from(e))
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
struct Message(String);
