//! Execution Pools Module
//!
//! Two independent pools keep expensive work off the request-handling
//! runtime: a semaphore-bounded pool for I/O-bound operations and a set of
//! dedicated worker threads for CPU-bound computation.
//!
//! Both pools are constructed explicitly at startup and passed around by
//! handle; there is no lazy global state.

mod cpu_pool;
mod io_pool;

pub use cpu_pool::CpuPool;
pub use io_pool::IoPool;

use std::sync::Arc;

// == Exec Pools ==
/// The pair of process-wide pools, built once in `main` and shared by every
/// tool through `Arc`.
#[derive(Clone)]
pub struct ExecPools {
    /// Bounded pool for operations that wait on external systems
    pub io: Arc<IoPool>,
    /// Dedicated threads for computation that must not occupy the runtime
    pub cpu: Arc<CpuPool>,
}

impl ExecPools {
    /// Builds both pools. The CPU workers start eagerly; the I/O pool's
    /// permits exist from this point on.
    pub fn new(io_workers: usize, cpu_workers: usize) -> Self {
        Self {
            io: Arc::new(IoPool::new(io_workers)),
            cpu: Arc::new(CpuPool::new(cpu_workers)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pools_operate_independently() {
        let pools = ExecPools::new(2, 1);

        // A failing CPU job must not disturb a concurrent I/O task.
        let cpu = pools.cpu.clone();
        let cpu_task = tokio::spawn(async move {
            cpu.submit::<String, _>(|| panic!("cpu task blew up")).await
        });
        let io_result = pools.io.submit(async { 42 }).await;

        assert_eq!(io_result.unwrap(), 42);
        assert!(cpu_task.await.unwrap().is_err());

        // The CPU pool stays usable after a panic in a job.
        let ok = pools.cpu.submit(|| Ok("still alive".to_string())).await;
        assert_eq!(ok.unwrap(), "still alive");
    }
}
