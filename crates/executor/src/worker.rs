//! Dedicated search worker thread.
//!
//! The worker owns the [`Executor`] on one named OS thread. Callers post
//! requests through a bounded queue and read replies from a channel; messages
//! are handled strictly one at a time, in arrival order, so no mutation ever
//! interleaves with a query.

use parking_lot::Mutex as ParkingMutex;
use std::sync::mpsc::{self, Receiver, Sender, SyncSender, TrySendError};
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

use crate::message::{handle_message, handle_raw};
use crate::{Error, Executor, Reply, Request, Result, WorkerConfig};

enum Inbound {
    Request(Request),
    Raw(String),
}

/// Handle to a running search worker.
///
/// Dropping the handle shuts the worker down after it drains its queue.
///
/// # Example
///
/// ```
/// use loupe_executor::{Request, SearchWorker, WorkerConfig};
/// use serde_json::json;
///
/// let (worker, replies) = SearchWorker::spawn(WorkerConfig::default()).unwrap();
/// worker.post(Request::new(1, "addDocument", json!({"id": "a", "body": "hello world"}))).unwrap();
/// worker.post(Request::new(2, "search", json!({"query": "hello"}))).unwrap();
///
/// assert!(!replies.recv().unwrap().is_error());
/// let hits = replies.recv().unwrap();
/// assert_eq!(hits.data().unwrap()[0]["id"], "a");
/// worker.shutdown();
/// ```
pub struct SearchWorker {
    sender: ParkingMutex<Option<SyncSender<Inbound>>>,
    handle: ParkingMutex<Option<JoinHandle<()>>>,
    thread_name: String,
}

impl SearchWorker {
    /// Start a worker over an empty index.
    ///
    /// Returns the handle and the receiving end of the reply channel.
    pub fn spawn(config: WorkerConfig) -> Result<(SearchWorker, Receiver<Reply>)> {
        Self::spawn_with(config, Executor::new())
    }

    /// Start a worker that takes ownership of an existing executor.
    pub fn spawn_with(
        config: WorkerConfig,
        executor: Executor,
    ) -> Result<(SearchWorker, Receiver<Reply>)> {
        config.validate()?;

        let (sender, inbox) = mpsc::sync_channel(config.queue_capacity);
        let (reply_tx, reply_rx) = mpsc::channel();

        let handle = std::thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || worker_loop(executor, inbox, reply_tx))?;

        info!(
            thread = %config.thread_name,
            queue_capacity = config.queue_capacity,
            "search worker started"
        );

        let worker = SearchWorker {
            sender: ParkingMutex::new(Some(sender)),
            handle: ParkingMutex::new(Some(handle)),
            thread_name: config.thread_name,
        };
        Ok((worker, reply_rx))
    }

    /// Queue a request, blocking while the queue is full.
    ///
    /// Fails with `WorkerStopped` after shutdown.
    pub fn post(&self, request: Request) -> Result<()> {
        self.sender()?
            .send(Inbound::Request(request))
            .map_err(|_| Error::WorkerStopped)
    }

    /// Queue a request without blocking.
    ///
    /// Fails with `QueueFull` when the queue is at capacity and with
    /// `WorkerStopped` after shutdown.
    pub fn try_post(&self, request: Request) -> Result<()> {
        try_send(&self.sender()?, Inbound::Request(request))
    }

    /// Queue raw JSON message text, blocking while the queue is full.
    pub fn post_json(&self, text: impl Into<String>) -> Result<()> {
        self.sender()?
            .send(Inbound::Raw(text.into()))
            .map_err(|_| Error::WorkerStopped)
    }

    /// Name of the worker thread
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// True until `shutdown` has been called
    pub fn is_running(&self) -> bool {
        self.sender.lock().is_some()
    }

    /// Close the queue, let the worker finish queued messages, and join it.
    ///
    /// Idempotent.
    pub fn shutdown(&self) {
        let sender = self.sender.lock().take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        if let Some(handle) = self.handle.lock().take() {
            if handle.join().is_err() {
                warn!(thread = %self.thread_name, "search worker thread panicked");
            }
        }
        info!(thread = %self.thread_name, "search worker stopped");
    }

    fn sender(&self) -> Result<SyncSender<Inbound>> {
        self.sender.lock().clone().ok_or(Error::WorkerStopped)
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn try_send(sender: &SyncSender<Inbound>, inbound: Inbound) -> Result<()> {
    match sender.try_send(inbound) {
        Ok(()) => Ok(()),
        Err(TrySendError::Full(_)) => Err(Error::QueueFull),
        Err(TrySendError::Disconnected(_)) => Err(Error::WorkerStopped),
    }
}

/// Runs until every sender is dropped and the queue is drained
fn worker_loop(mut executor: Executor, inbox: Receiver<Inbound>, replies: Sender<Reply>) {
    for inbound in inbox {
        let reply = match inbound {
            Inbound::Request(request) => handle_message(&mut executor, request),
            Inbound::Raw(text) => handle_raw(&mut executor, &text),
        };
        if replies.send(reply).is_err() {
            debug!("reply receiver dropped; discarding reply");
        }
    }
}
