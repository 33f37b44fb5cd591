//! Typed, asynchronous client over an injectable transport.
//!
//! # Design
//! `Client` holds four fixed fields: host, scheme, decoder and transport.
//! None of them change after construction and no call writes to shared
//! state, so a client can be cloned freely and used from many tasks at
//! once. Every call goes build → perform → decode:
//! - `fetch` is the future form.
//! - `get` spawns `fetch` on the client's tokio runtime and hands the result
//!   to a completion on the transport's task. The runtime is set with
//!   `ClientBuilder::runtime` or captured from the building thread, so `get`
//!   may be called from threads outside any runtime.
//! - `get_on` does the same but redispatches the completion onto a chosen
//!   `ExecutionContext`.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::runtime::Handle;

use crate::builder;
use crate::context::ExecutionContext;
use crate::decode::JsonDecoder;
use crate::descriptor::RequestDescriptor;
use crate::error::{NetworkingError, TransportError};
use crate::http::TransportRequest;
use crate::transport::Transport;

pub const DEFAULT_SCHEME: &str = "https";

#[derive(Clone)]
pub struct Client {
    host: String,
    scheme: String,
    decoder: Arc<JsonDecoder>,
    transport: Arc<dyn Transport>,
    runtime: Option<Handle>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.host)
            .field("scheme", &self.scheme)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client for `host` over `https` with default key handling.
    pub fn new(host: impl Into<String>, transport: impl Transport) -> Self {
        Self::builder(host, transport).build()
    }

    pub fn builder(host: impl Into<String>, transport: impl Transport) -> ClientBuilder {
        ClientBuilder {
            host: host.into(),
            scheme: DEFAULT_SCHEME.to_string(),
            decoder: JsonDecoder::default(),
            transport: Arc::new(transport),
            runtime: None,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn decoder(&self) -> &JsonDecoder {
        &self.decoder
    }

    /// Resolve `descriptor` against this client's scheme and host.
    pub fn build_request(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<TransportRequest, NetworkingError> {
        builder::build(&self.scheme, &self.host, descriptor)
    }

    /// Build, perform and decode one call.
    ///
    /// No I/O happens if the request cannot be built.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, NetworkingError> {
        let request = self.build_request(descriptor)?;
        self.execute(request).await
    }

    /// Dispatch one call and invoke `completion` exactly once with its
    /// outcome.
    ///
    /// A build failure invokes `completion` before this returns. Otherwise
    /// the exchange is spawned on the client's runtime and `completion` runs
    /// on that task when it finishes; redispatching is up to the caller (or
    /// use `get_on`). With no runtime configured, captured, or current,
    /// `completion` receives a `Request` error before this returns.
    pub fn get<T, F>(&self, descriptor: &RequestDescriptor, completion: F)
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T, NetworkingError>) + Send + 'static,
    {
        let request = match self.build_request(descriptor) {
            Ok(request) => request,
            Err(e) => {
                completion(Err(e));
                return;
            }
        };
        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            tracing::warn!(url = %request.url, "no tokio runtime to dispatch on");
            completion(Err(NetworkingError::request(TransportError::message(
                "no tokio runtime available to perform the request",
            ))));
            return;
        };
        let client = self.clone();
        runtime.spawn(async move {
            completion(client.execute(request).await);
        });
    }

    /// Like `get`, but `completion` always runs on `context`.
    pub fn get_on<T, F, C>(&self, descriptor: &RequestDescriptor, context: &C, completion: F)
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T, NetworkingError>) + Send + 'static,
        C: ExecutionContext + Clone,
    {
        let context = context.clone();
        self.get(descriptor, move |result: Result<T, NetworkingError>| {
            context.execute(Box::new(move || completion(result)));
        });
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: TransportRequest,
    ) -> Result<T, NetworkingError> {
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        let exchange = self.transport.perform(&request).await;
        self.decoder.decode_response(exchange)
    }
}

/// Explicit client configuration.
pub struct ClientBuilder {
    host: String,
    scheme: String,
    decoder: JsonDecoder,
    transport: Arc<dyn Transport>,
    runtime: Option<Handle>,
}

impl ClientBuilder {
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn decoder(mut self, decoder: JsonDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Runtime that `get` spawns exchanges on.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Without an explicit runtime, the runtime of the calling thread (if
    /// any) is captured here.
    pub fn build(self) -> Client {
        Client {
            host: self.host,
            scheme: self.scheme,
            decoder: Arc::new(self.decoder),
            transport: self.transport,
            runtime: self.runtime.or_else(|| Handle::try_current().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde::Deserialize;

    use crate::decode::KeyStrategy;
    use crate::http::RawExchange;
    use crate::mock::ScriptedTransport;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn defaults_to_https_and_plain_keys() {
        let client = Client::new("api.github.com", ScriptedTransport::new());
        assert_eq!(client.scheme(), "https");
        assert_eq!(client.host(), "api.github.com");
        assert_eq!(client.decoder().key_strategy(), KeyStrategy::UseDefaultKeys);
    }

    #[test]
    fn builder_overrides_scheme_and_decoder() {
        let client = Client::builder("localhost:3000", ScriptedTransport::new())
            .scheme("http")
            .decoder(JsonDecoder::snake_case())
            .build();
        let req = client.build_request(&RequestDescriptor::get("/zen")).unwrap();
        assert_eq!(req.url.as_str(), "http://localhost:3000/zen");
        assert_eq!(client.decoder().key_strategy(), KeyStrategy::ConvertFromSnakeCase);
    }

    #[test]
    fn debug_omits_transport() {
        let client = Client::new("api.github.com", ScriptedTransport::new());
        let rendered = format!("{client:?}");
        assert!(rendered.contains("api.github.com"));
        assert!(rendered.ends_with(".. }"));
    }

    #[test]
    fn get_from_plain_thread_uses_configured_runtime() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let transport = ScriptedTransport::new().reply(RawExchange::success(r#"{"id":7}"#));
        let client = Client::builder("api.example.com", transport)
            .runtime(rt.handle().clone())
            .build();

        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            client.get(&RequestDescriptor::get("/items/7"), move |result: Result<Item, NetworkingError>| {
                tx.send(result).unwrap();
            });
        })
        .join()
        .unwrap();

        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.unwrap(), Item { id: 7 });
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn get_without_any_runtime_reports_request_error() {
        let transport = ScriptedTransport::new();
        let client = Client::new("api.example.com", transport.clone());

        let (tx, rx) = std::sync::mpsc::channel();
        client.get(&RequestDescriptor::get("/items/7"), move |result: Result<Item, NetworkingError>| {
            tx.send(result).unwrap();
        });

        let err = rx.try_recv().unwrap().unwrap_err();
        assert!(err.is_transport());
        assert!(rx.try_recv().is_err());
        assert_eq!(transport.recorded_len(), 0);
    }
}
