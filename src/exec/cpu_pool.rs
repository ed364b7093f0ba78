//! CPU Pool Module
//!
//! A fixed set of dedicated OS worker threads for CPU-bound computation,
//! started eagerly at construction. Jobs travel over a channel and results
//! come back on oneshot channels, so the async runtime never runs (or waits
//! on) the computation itself.
//!
//! The original deployment used separate processes here to contain an
//! arbitrary-code evaluator; the whitelisted expression parser removes that
//! threat, and dedicated threads keep the remaining contract: isolation from
//! the runtime and failure containment. Panics inside a job are caught on
//! the worker, reported to the submitter as an error value, and the worker
//! keeps serving.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::error::{GatewayError, Result};

/// Type-erased unit of work; the closure owns its reply channel.
type Job = Box<dyn FnOnce() + Send + 'static>;

// == CPU Pool ==
/// Fixed-size worker-thread pool for CPU-bound jobs.
pub struct CpuPool {
    sender: mpsc::UnboundedSender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl CpuPool {
    /// Starts `workers` dedicated threads immediately.
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let (sender, receiver) = mpsc::unbounded_channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let handles = (0..workers)
            .map(|id| {
                let receiver = receiver.clone();
                std::thread::Builder::new()
                    .name(format!("cpu-worker-{id}"))
                    .spawn(move || worker_loop(id, receiver))
                    .expect("failed to spawn CPU worker thread")
            })
            .collect();

        Self {
            sender,
            workers: handles,
        }
    }

    // == Submit ==
    /// Runs `job` on a worker thread and returns its result.
    ///
    /// A panic inside the job is captured and reported as a `Pool` error
    /// value; the failing job never takes down the worker or the caller.
    pub async fn submit<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel::<Result<T>>();

        let wrapped: Job = Box::new(move || {
            let outcome = match catch_unwind(AssertUnwindSafe(job)) {
                Ok(result) => result,
                Err(panic) => Err(GatewayError::Pool(panic_message(panic.as_ref()))),
            };
            // Submitter may have gone away; its result is simply dropped.
            let _ = reply_tx.send(outcome);
        });

        self.sender
            .send(wrapped)
            .map_err(|_| GatewayError::Pool("CPU pool is shut down".to_string()))?;

        reply_rx
            .await
            .map_err(|_| GatewayError::Pool("CPU worker dropped the job".to_string()))?
    }

    /// Returns the number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers.len()
    }
}

/// Worker body: pull jobs until every sender handle is gone.
fn worker_loop(id: usize, receiver: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>) {
    debug!(worker = id, "CPU worker started");
    loop {
        let job = {
            let mut rx = match receiver.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            rx.blocking_recv()
        };
        match job {
            Some(job) => job(),
            None => break,
        }
    }
    debug!(worker = id, "CPU worker stopped");
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        warn!("CPU job panicked with a non-string payload");
        "task panicked".to_string()
    }
}
