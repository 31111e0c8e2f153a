//! # ForegroundQueue: the serialized engine timeline.
//!
//! A single-consumer execution channel bound to one run-loop: a dedicated OS
//! thread driving a current-thread tokio runtime. Submissions arrive from any
//! thread over an unbounded channel; delayed submissions are parked in a
//! [`DelayQueue`] keyed by their due instant and re-enter the same loop when
//! they expire.
//!
//! ## Dispatch algorithm
//! ```text
//! loop {
//!   ├─► drain due timers (fire_at ≤ now)      (biased ahead of the channel)
//!   ├─► next queued request, FIFO             (immediate and idle alike)
//!   │     ├─► acquire context
//!   │     ├─► run closure (panic contained)
//!   │     └─► release context, drop envelope
//!   └─► exit on cancel or channel close
//! }
//! ```
//!
//! ## Rules
//! - Executions happen inline on the loop thread, so at most one task ever
//!   holds the context — mutual exclusion comes from the topology, not from
//!   a lock in this module.
//! - Delayed requests never fire before their due instant (timer granularity
//!   is milliseconds) and fire at the next loop iteration once due.
//! - Requests still queued when the loop stops are dropped without running.

use std::thread;

use tokio::runtime;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::time::DelayQueue;

use crate::clock::MonotonicClock;
use crate::core::runner::run_guarded;
use crate::error::RuntimeError;
use crate::events::{Bus, Lane};
use crate::tasks::{DelayedTaskRequest, TaskRequest};

const THREAD_NAME: &str = "tasklane-foreground";

/// Messages accepted by the run-loop.
enum ForegroundJob {
    /// Execute in FIFO order behind everything already queued.
    Run(TaskRequest),
    /// Park in the timer facility; execute once due.
    RunAt(DelayedTaskRequest),
}

/// Handle to the serialized foreground run-loop.
///
/// Dropping the handle stops the loop and joins its thread.
pub(crate) struct ForegroundQueue {
    tx: mpsc::UnboundedSender<ForegroundJob>,
    cancel: CancellationToken,
    thread: Option<thread::JoinHandle<()>>,
}

impl ForegroundQueue {
    /// Spawns the run-loop thread.
    pub(crate) fn start(clock: MonotonicClock, bus: Bus) -> Result<Self, RuntimeError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();

        // Built here rather than on the new thread so a failure surfaces as
        // a RuntimeError instead of a dead run-loop.
        let runtime = runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|source| RuntimeError::ForegroundStart { source })?;

        let thread = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || runtime.block_on(run_loop(rx, clock, bus, loop_cancel)))
            .map_err(|source| RuntimeError::ForegroundStart { source })?;

        Ok(Self {
            tx,
            cancel,
            thread: Some(thread),
        })
    }

    /// Enqueues an immediate or idle request behind everything already queued.
    pub(crate) fn submit(&self, request: TaskRequest) {
        let _ = self.tx.send(ForegroundJob::Run(request));
    }

    /// Registers a one-shot delayed request.
    pub(crate) fn submit_delayed(&self, delayed: DelayedTaskRequest) {
        let _ = self.tx.send(ForegroundJob::RunAt(delayed));
    }
}

impl Drop for ForegroundQueue {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// The run-loop: due timers first, then queued submissions, one at a time.
async fn run_loop(
    mut rx: mpsc::UnboundedReceiver<ForegroundJob>,
    clock: MonotonicClock,
    bus: Bus,
    cancel: CancellationToken,
) {
    let mut timers: DelayQueue<TaskRequest> = DelayQueue::new();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            Some(due) = std::future::poll_fn(|cx| timers.poll_expired(cx)), if !timers.is_empty() => {
                run_guarded(due.into_inner(), &clock, &bus, Lane::Foreground);
            }
            job = rx.recv() => match job {
                Some(ForegroundJob::Run(request)) => {
                    run_guarded(request, &clock, &bus, Lane::Foreground);
                }
                Some(ForegroundJob::RunAt(delayed)) => {
                    timers.insert_at(
                        delayed.request,
                        tokio::time::Instant::from_std(delayed.fire_at),
                    );
                }
                None => break,
            },
        }
    }
}
