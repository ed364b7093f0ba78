//! I/O Pool Module
//!
//! A bounded pool for operations that block on external systems (search
//! calls, LLM completions). Concurrency is capped by a semaphore so a burst
//! of requests cannot spawn unbounded in-flight network work; the caller's
//! runtime thread is only ever suspended, never blocked.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::warn;

use crate::error::{GatewayError, Result};

// == I/O Pool ==
/// Semaphore-bounded executor for I/O-bound futures.
#[derive(Debug)]
pub struct IoPool {
    permits: Arc<Semaphore>,
    workers: usize,
}

impl IoPool {
    /// Creates a pool allowing `workers` tasks in flight at once.
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    // == Submit ==
    /// Runs `task` under a concurrency permit and returns its output.
    ///
    /// Waits for a free permit, spawns the task, and awaits completion. A
    /// panic inside the task is captured and surfaced as a `Pool` error
    /// rather than propagating; the pool itself never crashes the caller.
    pub async fn submit<F>(&self, task: F) -> Result<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| GatewayError::Pool("I/O pool is shut down".to_string()))?;

        let handle = tokio::spawn(async move {
            let output = task.await;
            drop(permit);
            output
        });

        handle.await.map_err(|err| {
            warn!(error = %err, "I/O pool task failed");
            if err.is_panic() {
                GatewayError::Pool("task panicked".to_string())
            } else {
                GatewayError::Pool(err.to_string())
            }
        })
    }

    /// Returns the configured concurrency limit.
    pub fn workers(&self) -> usize {
        self.workers
    }
}
