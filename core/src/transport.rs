//! The injectable transport seam.
//!
//! # Design
//! A `Transport` performs exactly one exchange per `perform` call and never
//! fails out of band: whatever happened is reported in the returned
//! `RawExchange`. The client owns no I/O of its own, so swapping the
//! transport (see `mock::ScriptedTransport`) swaps the network.

use async_trait::async_trait;

use crate::http::{RawExchange, TransportRequest};

/// Anything that can perform one HTTP exchange asynchronously.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn perform(&self, request: &TransportRequest) -> RawExchange;
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use async_trait::async_trait;
    use bytes::Bytes;

    use crate::error::TransportError;
    use crate::http::{HttpMethod, RawExchange, TransportRequest};

    use super::Transport;

    /// Transport backed by a `ureq` agent, run on tokio's blocking pool.
    ///
    /// Non-2xx statuses are returned as data rather than errors; status
    /// interpretation is left to the decoder and the model.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }

        pub fn with_agent(agent: ureq::Agent) -> Self {
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Transport for UreqTransport {
        async fn perform(&self, request: &TransportRequest) -> RawExchange {
            let agent = self.agent.clone();
            let method = request.method;
            let url = request.url.to_string();
            match tokio::task::spawn_blocking(move || execute(&agent, method, &url)).await {
                Ok(exchange) => exchange,
                Err(join) => RawExchange::failed(TransportError::new(join)),
            }
        }
    }

    fn execute(agent: &ureq::Agent, method: HttpMethod, url: &str) -> RawExchange {
        let response = match method {
            HttpMethod::Get => agent.get(url).call(),
            HttpMethod::Post => agent.post(url).send_empty(),
        };
        let mut response = match response {
            Ok(response) => response,
            Err(e) => return RawExchange::failed(TransportError::new(e)),
        };

        let status = response.status().as_u16();
        tracing::debug!(%method, url, status, "exchange finished");
        match response.body_mut().read_to_vec() {
            Ok(body) => RawExchange {
                body: Some(Bytes::from(body)),
                status: Some(status),
                error: None,
            },
            Err(e) => RawExchange::failed(TransportError::new(e)).with_status(status),
        }
    }
}
