//! Execution contexts for delivering completions.
//!
//! # Design
//! A transport finishes on whatever task it likes. Callers that need their
//! completion somewhere specific (a UI thread, a particular runtime) pass an
//! `ExecutionContext` to `Client::get_on`, which turns "continue over there"
//! into an explicit step instead of a convention every callback must
//! remember.

use tokio::sync::mpsc;

/// A unit of work handed to a context.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait ExecutionContext: Send + Sync + 'static {
    fn execute(&self, job: Job);
}

/// Runs the job on the calling thread, right away.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl ExecutionContext for Immediate {
    fn execute(&self, job: Job) {
        job();
    }
}

impl ExecutionContext for tokio::runtime::Handle {
    fn execute(&self, job: Job) {
        self.spawn(async move { job() });
    }
}

/// Create a FIFO queue context and the runner that drains it.
///
/// Jobs run only when the owner of the `QueueRunner` asks, on the owner's
/// thread, in submission order.
pub fn serial_queue() -> (SerialQueue, QueueRunner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SerialQueue { tx }, QueueRunner { rx })
}

#[derive(Debug, Clone)]
pub struct SerialQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl ExecutionContext for SerialQueue {
    fn execute(&self, job: Job) {
        if self.tx.send(job).is_err() {
            tracing::warn!("queue runner dropped; completion discarded");
        }
    }
}

#[derive(Debug)]
pub struct QueueRunner {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl QueueRunner {
    /// Run every job already queued. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Wait for the next job and run it. Returns `false` once every
    /// `SerialQueue` handle is gone and the queue is empty.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn immediate_runs_inline() {
        let hit = Arc::new(Mutex::new(false));
        let flag = hit.clone();
        Immediate.execute(Box::new(move || *flag.lock().unwrap() = true));
        assert!(*hit.lock().unwrap());
    }

    #[test]
    fn queue_defers_until_drained_in_order() {
        let (queue, mut runner) = serial_queue();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let seen = seen.clone();
            queue.execute(Box::new(move || seen.lock().unwrap().push(i)));
        }
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(runner.run_pending(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(runner.run_pending(), 0);
    }

    #[tokio::test]
    async fn run_next_stops_when_all_handles_drop() {
        let (queue, mut runner) = serial_queue();
        queue.execute(Box::new(|| {}));
        drop(queue);
        assert!(runner.run_next().await);
        assert!(!runner.run_next().await);
    }
}
