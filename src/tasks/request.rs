//! # Request envelopes binding tasks to their execution lane.
//!
//! A [`TaskRequest`] fixes where an owned [`Task`] is allowed to run:
//! - no context bound → any background worker, no locking;
//! - context bound → the foreground thread, with the context acquired for
//!   the full closure invocation.
//!
//! The queue that holds a request is its sole owner until execution, after
//! which ownership is consumed by the dispatch — no shared or raw pointers
//! cross threads.

use std::fmt;
use std::time::Instant;

use crate::clock::MonotonicClock;
use crate::context::{ContextGuard, ContextHandle};
use crate::tasks::task::{Task, TaskKind};

/// Envelope binding a [`Task`] to an optional execution context.
pub struct TaskRequest {
    context: Option<ContextHandle>,
    task: Task,
}

impl fmt::Debug for TaskRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRequest")
            .field("kind", &self.kind())
            .field("foreground", &self.is_foreground())
            .finish()
    }
}

impl TaskRequest {
    /// Builds a context-free request, eligible for any background worker.
    pub fn background(task: Task) -> Self {
        Self {
            context: None,
            task,
        }
    }

    /// Builds a request that must execute with `context` acquired on the
    /// foreground thread.
    pub fn foreground(context: ContextHandle, task: Task) -> Self {
        Self {
            context: Some(context),
            task,
        }
    }

    /// Variant tag of the wrapped task.
    pub fn kind(&self) -> TaskKind {
        self.task.kind()
    }

    /// Whether this request is bound to the foreground context.
    pub fn is_foreground(&self) -> bool {
        self.context.is_some()
    }

    /// Consumes the envelope: acquires the context if one is bound, runs the
    /// task, and releases on the way out (unwinding included).
    pub(crate) fn dispatch(self, clock: &MonotonicClock) {
        let Self { context, task } = self;
        match context {
            Some(context) => {
                let _guard = ContextGuard::enter(context.as_ref());
                task.run(clock);
            }
            None => task.run(clock),
        }
    }
}

/// A foreground request plus the absolute instant it becomes due.
///
/// One-shot by construction: registered with the run-loop timer on arrival,
/// fires once, self-deregisters, never reschedules.
#[derive(Debug)]
pub struct DelayedTaskRequest {
    pub(crate) request: TaskRequest,
    pub(crate) fire_at: Instant,
}

impl DelayedTaskRequest {
    /// Binds `request` to an absolute due instant.
    pub fn new(request: TaskRequest, fire_at: Instant) -> Self {
        Self { request, fire_at }
    }

    /// The instant this request becomes due.
    pub fn fire_at(&self) -> Instant {
        self.fire_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExecutionContext;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Probe {
        acquired: AtomicUsize,
        released: AtomicUsize,
    }

    impl ExecutionContext for Probe {
        fn acquire(&self) {
            self.acquired.fetch_add(1, Ordering::SeqCst);
        }
        fn release(&self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_foreground_dispatch_brackets_context() {
        let probe = Arc::new(Probe::default());
        let handle: ContextHandle = probe.clone();
        let clock = MonotonicClock::start();

        let inner = probe.clone();
        let request = TaskRequest::foreground(
            handle,
            Task::immediate(move || {
                assert_eq!(inner.acquired.load(Ordering::SeqCst), 1);
                assert_eq!(inner.released.load(Ordering::SeqCst), 0);
            }),
        );
        assert!(request.is_foreground());
        request.dispatch(&clock);

        assert_eq!(probe.acquired.load(Ordering::SeqCst), 1);
        assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_background_dispatch_skips_locking() {
        let clock = MonotonicClock::start();
        let request = TaskRequest::background(Task::immediate(|| ()));
        assert!(!request.is_foreground());
        request.dispatch(&clock);
    }
}
