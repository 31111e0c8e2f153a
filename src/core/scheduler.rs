//! # Scheduler: routes submissions onto two timelines and owns teardown.
//!
//! The [`Scheduler`] owns the serialized foreground run-loop, the background
//! worker pool, the monotonic clock, the event bus, and the set-once
//! `disposing` flag. It is the single entry point for all four submission
//! operations; nothing in the crate reaches for ambient global state.
//!
//! ## High-level architecture
//! ```text
//! any thread ──► submit_background(task) ─────────────► BackgroundPool
//!                  │ (disposing: run here, now)           worker 1..N
//!                  ▼                                      no context lock
//!              calling thread
//!
//! any thread ──► submit_foreground(ctx, task) ─┐
//! any thread ──► submit_idle(ctx, task) ───────┼──► ForegroundQueue ──► run-loop
//! any thread ──► submit_delayed(ctx, task, d) ─┘        │ FIFO + timers
//!                                                       ▼
//!                                              context acquired per task,
//!                                              one task at a time
//! ```
//!
//! ## Rules
//! - **Fire-and-forget**: no submission blocks the submitting thread, except
//!   the disposal fast-path, which runs the task synchronously to avoid
//!   deadlocking engine teardown.
//! - **`disposing` discipline**: set exactly once (Release); every submission
//!   path reads it first (Acquire). Foreground/delayed/idle submissions after
//!   disposal are contract violations and assert — such calls only originate
//!   from engine internals that must respect teardown order.
//! - **Ordering**: immediate foreground submissions are FIFO; delayed ones
//!   fire no earlier than requested; background ones are unordered.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tasklane::{ContextHandle, ExecutionContext, Scheduler, SchedulerConfig, Task};
//!
//! struct NoopContext;
//!
//! impl ExecutionContext for NoopContext {
//!     fn acquire(&self) {}
//!     fn release(&self) {}
//! }
//!
//! fn main() -> Result<(), tasklane::RuntimeError> {
//!     let scheduler = Scheduler::new(SchedulerConfig::default())?;
//!     let context: ContextHandle = Arc::new(NoopContext);
//!
//!     scheduler.submit_background(Task::immediate(|| { /* compile */ }));
//!     scheduler.submit_foreground(context.clone(), Task::immediate(|| { /* touch engine */ }));
//!     scheduler.submit_idle(context, Task::idle(|_deadline| { /* sweep */ }));
//!
//!     scheduler.begin_dispose();
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::broadcast::error::RecvError;

use crate::clock::MonotonicClock;
use crate::config::SchedulerConfig;
use crate::context::ContextHandle;
use crate::core::foreground::ForegroundQueue;
use crate::core::pool::BackgroundPool;
use crate::core::runner::run_guarded;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind, Lane};
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::tasks::{DelayedTaskRequest, Task, TaskRequest};

/// Cross-thread task scheduler with one serialized foreground timeline and a
/// background worker pool.
///
/// All submission operations take `&self` and are callable from any thread.
/// Dropping the scheduler implies disposal: the run-loop is stopped and
/// joined, the pool is shut down, and still-queued tasks are dropped without
/// running.
pub struct Scheduler {
    disposing: AtomicBool,
    clock: MonotonicClock,
    bus: Bus,
    // Declaration order is drop order: the run-loop joins before the pool
    // (which also carries the subscriber workers) shuts down.
    foreground: ForegroundQueue,
    pool: BackgroundPool,
}

impl Scheduler {
    /// Starts a scheduler with no subscribers.
    pub fn new(config: SchedulerConfig) -> Result<Self, RuntimeError> {
        Self::with_subscribers(config, Vec::new())
    }

    /// Starts a scheduler and attaches the provided event subscribers.
    ///
    /// Subscriber workers ride on the background pool's runtime, so they
    /// never add latency to the foreground timeline.
    pub fn with_subscribers(
        config: SchedulerConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Result<Self, RuntimeError> {
        let clock = MonotonicClock::start();
        let bus = Bus::new(config.bus_capacity);
        let pool = BackgroundPool::start(config.pool_workers, clock, bus.clone())?;

        if !subscribers.is_empty() {
            let set = SubscriberSet::new(subscribers, pool.handle());
            let mut rx = bus.subscribe();
            pool.handle().spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => set.emit(&event),
                        Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    }
                }
            });
        }

        let foreground = ForegroundQueue::start(clock, bus.clone())?;

        Ok(Self {
            disposing: AtomicBool::new(false),
            clock,
            bus,
            foreground,
            pool,
        })
    }

    /// Submits a context-free task to the background pool.
    ///
    /// Callable from any thread. Once disposal has begun the task runs
    /// synchronously on the calling thread instead of queueing — engine
    /// teardown would otherwise deadlock waiting on a pool that is going
    /// away. Either way the task runs exactly once.
    pub fn submit_background(&self, task: Task) {
        let request = TaskRequest::background(task);
        if self.is_disposing() {
            let kind = request.kind();
            run_guarded(request, &self.clock, &self.bus, Lane::Background);
            self.bus.publish(
                Event::now(EventKind::FastPathRun)
                    .with_lane(Lane::Background)
                    .with_task_kind(kind),
            );
            return;
        }
        self.pool.submit(request);
    }

    /// Submits a task to run on the foreground timeline with `context`
    /// acquired.
    ///
    /// FIFO with respect to other immediate foreground submissions.
    ///
    /// # Panics
    /// If disposal has already begun — a contract violation, not a
    /// recoverable condition.
    pub fn submit_foreground(&self, context: ContextHandle, task: Task) {
        assert!(
            !self.is_disposing(),
            "foreground submission after begin_dispose"
        );
        self.foreground.submit(TaskRequest::foreground(context, task));
    }

    /// Submits a task to the foreground timeline no earlier than `delay`
    /// from now.
    ///
    /// One-shot: the timer fires once and behaves exactly like
    /// [`submit_foreground`](Self::submit_foreground) for that single task.
    /// A zero delay fires at the next run-loop iteration.
    ///
    /// # Panics
    /// If disposal has already begun.
    pub fn submit_delayed(&self, context: ContextHandle, task: Task, delay: Duration) {
        assert!(
            !self.is_disposing(),
            "delayed submission after begin_dispose"
        );
        let fire_at = Instant::now() + delay;
        self.foreground.submit_delayed(DelayedTaskRequest::new(
            TaskRequest::foreground(context, task),
            fire_at,
        ));
    }

    /// Submits an idle task to the foreground timeline.
    ///
    /// Same channel, ordering, and locking as
    /// [`submit_foreground`](Self::submit_foreground); at dispatch an idle
    /// closure receives `monotonic_time() + IDLE_BUDGET_SECONDS` as its
    /// advisory deadline.
    ///
    /// # Panics
    /// If disposal has already begun.
    pub fn submit_idle(&self, context: ContextHandle, task: Task) {
        assert!(!self.is_disposing(), "idle submission after begin_dispose");
        self.foreground.submit(TaskRequest::foreground(context, task));
    }

    /// Seconds elapsed since this scheduler was constructed.
    ///
    /// Monotonic, never decreases, collapsed to millisecond-rounded seconds
    /// for caller stability.
    pub fn monotonic_time(&self) -> f64 {
        self.clock.now_seconds()
    }

    /// The clock this scheduler anchors idle deadlines to.
    pub fn clock(&self) -> MonotonicClock {
        self.clock
    }

    /// Begins disposal: no further foreground/delayed/idle submissions are
    /// accepted, and background submissions run synchronously on the
    /// submitting thread.
    ///
    /// Called exactly once by the owning adapter during teardown, before the
    /// execution context is released.
    pub fn begin_dispose(&self) {
        self.disposing.store(true, Ordering::Release);
        self.bus.publish(Event::now(EventKind::DisposeStarted));
    }

    /// Whether disposal has begun.
    pub fn is_disposing(&self) -> bool {
        self.disposing.load(Ordering::Acquire)
    }

    pub(crate) fn bus(&self) -> &Bus {
        &self.bus
    }
}

impl Drop for Scheduler {
    /// Dropping implies disposal for owners that never submit again; the
    /// flag is raised so in-flight submitters fast-path instead of racing a
    /// pool that is shutting down.
    fn drop(&mut self) {
        self.disposing.store(true, Ordering::Release);
    }
}
