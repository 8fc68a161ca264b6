//! Tokio runtime construction for the server binary.

use anyhow::{Context, Result};
use std::thread::available_parallelism;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

const DEFAULT_WORKER_THREADS: usize = 4;
const MAX_WORKER_THREADS: usize = 1024;
const STACK_SIZE: usize = 4 * 1024 * 1024;
const THREAD_KEEP_ALIVE: Duration = Duration::from_secs(300);
const THREAD_NAME: &str = "shiok-worker";

/// Worker count from `TOKIO_WORKER_THREADS`, else the available parallelism.
#[must_use]
pub fn worker_threads() -> usize {
    std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0 && n <= MAX_WORKER_THREADS)
        .unwrap_or_else(|| {
            available_parallelism().map(std::num::NonZero::get).unwrap_or(DEFAULT_WORKER_THREADS)
        })
}

/// Builds the multi-threaded runtime with I/O, timers and signals enabled.
///
/// # Errors
/// Returns an error if the OS refuses to spawn the worker threads.
pub fn build() -> Result<Runtime> {
    let workers = worker_threads();
    tracing::debug!(workers, "Building Tokio runtime");

    Builder::new_multi_thread()
        .enable_all()
        .worker_threads(workers)
        .thread_name(THREAD_NAME)
        .thread_stack_size(STACK_SIZE)
        .thread_keep_alive(THREAD_KEEP_ALIVE)
        .build()
        .context("Failed to build Tokio runtime")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_runs_futures() {
        let runtime = build().unwrap();
        assert_eq!(runtime.block_on(async { 7 }), 7);
        assert!(worker_threads() >= 1);
    }
}
