//! Scripted transport for tests.
//!
//! Replies are served in the order they were scripted. Once the script runs
//! out every exchange comes back empty, which decodes to `NoData`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::http::{RawExchange, TransportRequest};
use crate::transport::Transport;

struct Reply {
    delay: Option<Duration>,
    exchange: RawExchange,
}

#[derive(Default)]
struct ScriptState {
    replies: Mutex<VecDeque<Reply>>,
    recorded: Mutex<Vec<TransportRequest>>,
}

// A test that panics mid-assertion poisons the locks; the data is still whole.
impl ScriptState {
    fn replies(&self) -> MutexGuard<'_, VecDeque<Reply>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<TransportRequest>> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A `Transport` test double. Clones share the same script and recording.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    st: Arc<ScriptState>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, exchange: RawExchange) -> Self {
        self.push(None, exchange);
        self
    }

    /// Queue a reply that is delivered only after `delay`.
    pub fn reply_after(self, delay: Duration, exchange: RawExchange) -> Self {
        self.push(Some(delay), exchange);
        self
    }

    pub fn recorded(&self) -> Vec<TransportRequest> {
        self.st.recorded().clone()
    }

    pub fn recorded_len(&self) -> usize {
        self.st.recorded().len()
    }

    pub fn last_request(&self) -> Option<TransportRequest> {
        self.st.recorded().last().cloned()
    }

    fn push(&self, delay: Option<Duration>, exchange: RawExchange) {
        self.st.replies().push_back(Reply { delay, exchange });
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn perform(&self, request: &TransportRequest) -> RawExchange {
        self.st.recorded().push(request.clone());
        let reply = self.st.replies().pop_front();
        match reply {
            Some(Reply { delay, exchange }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                exchange
            }
            None => RawExchange::empty(),
        }
    }
}
