//! # BackgroundPool: context-free workers.
//!
//! A fixed-size worker pool backed by a multi-thread tokio runtime. Worker
//! count equals host-reported available parallelism (1 if the host cannot
//! report it). Submissions are picked up by whichever worker frees up first.
//!
//! ## Rules
//! - No ordering guarantee across workers; each request runs exactly once,
//!   eventually, on *some* worker.
//! - The context lock is never held here — only context-free requests are
//!   routed to the pool.
//! - A task panic ends only that task's execution; the worker, the pool
//!   state, and other queued tasks are unaffected.
//! - Requests still queued when the pool shuts down are dropped without
//!   running.

use std::num::NonZeroUsize;
use std::thread;

use tokio::runtime::{self, Handle, Runtime};

use crate::clock::MonotonicClock;
use crate::core::runner::run_guarded;
use crate::error::RuntimeError;
use crate::events::{Bus, Lane};
use crate::tasks::TaskRequest;

const WORKER_NAME: &str = "tasklane-worker";

/// Fixed-size worker pool for context-free requests.
pub(crate) struct BackgroundPool {
    runtime: Runtime,
    clock: MonotonicClock,
    bus: Bus,
}

impl BackgroundPool {
    /// Starts the pool with `workers` threads (0 = available parallelism).
    pub(crate) fn start(
        workers: usize,
        clock: MonotonicClock,
        bus: Bus,
    ) -> Result<Self, RuntimeError> {
        let workers = if workers == 0 {
            detected_parallelism()
        } else {
            workers
        };
        let runtime = runtime::Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name(WORKER_NAME)
            .build()
            .map_err(|source| RuntimeError::PoolStart { source })?;
        Ok(Self {
            runtime,
            clock,
            bus,
        })
    }

    /// Hands `request` to whichever worker picks it up first.
    pub(crate) fn submit(&self, request: TaskRequest) {
        let clock = self.clock;
        let bus = self.bus.clone();
        self.runtime.spawn(async move {
            run_guarded(request, &clock, &bus, Lane::Background);
        });
    }

    /// Handle for auxiliary tasks (event fan-out) that ride on the pool.
    pub(crate) fn handle(&self) -> &Handle {
        self.runtime.handle()
    }
}

/// Host-reported available parallelism, 1 if unknown.
fn detected_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
