//! Generic, typed HTTP/JSON client core.
//!
//! # Overview
//! Callers describe a call with a `RequestDescriptor`, the `Client` resolves
//! it into an absolute URL, a `Transport` performs the exchange, and a
//! `JsonDecoder` turns the raw result into the caller's model type or a
//! `NetworkingError`.
//!
//! # Design
//! - The transport is a trait object injected at construction; tests swap in
//!   `mock::ScriptedTransport`, production uses `UreqTransport`.
//! - Failures form a closed set: `InvalidUrl`, `Request`, `NoData`.
//! - The client carries no per-call state. Completion delivery is explicit:
//!   `fetch` returns a future, `get` runs a completion on the transport's
//!   task, `get_on` redispatches it onto an `ExecutionContext`.
//! - No retries, caching, streaming or cancellation.

pub mod builder;
pub mod client;
pub mod context;
pub mod decode;
pub mod descriptor;
pub mod error;
pub mod http;
pub mod mock;
pub mod transport;

pub use client::{Client, ClientBuilder, DEFAULT_SCHEME};
pub use context::{serial_queue, ExecutionContext, Immediate, Job, QueueRunner, SerialQueue};
pub use decode::{JsonDecoder, KeyStrategy};
pub use descriptor::{Parameters, RequestDescriptor};
pub use error::{NetworkingError, TransportError};
pub use http::{HttpMethod, RawExchange, TransportRequest};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
