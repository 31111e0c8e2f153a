//! # Task: the polymorphic unit of work.
//!
//! A [`Task`] is one of two variants, each carrying its own invocation
//! signature:
//! - [`Task::Immediate`] runs as soon as its turn on the chosen lane comes up
//!   and receives nothing;
//! - [`Task::Idle`] receives an advisory deadline in clock seconds, computed
//!   at dispatch time as `now + IDLE_BUDGET_SECONDS`.
//!
//! Dispatch is a `match` on the variant. Ownership is linear: a task is
//! created by the caller, moved into the scheduler on submission, and
//! consumed exactly once by its run (or dropped without running during
//! teardown) — never both, never twice.
//!
//! ## Example
//! ```rust
//! use tasklane::{Task, TaskKind};
//!
//! let work = Task::immediate(|| println!("compiled"));
//! assert_eq!(work.kind(), TaskKind::Immediate);
//!
//! let tidy = Task::idle(|deadline| {
//!     // sweep until `deadline` (seconds on the scheduler clock), then yield
//!     let _ = deadline;
//! });
//! assert_eq!(tidy.kind(), TaskKind::Idle);
//! ```

use std::fmt;

use crate::clock::MonotonicClock;

/// Advisory slice handed to idle closures, in seconds: one 60 Hz frame.
///
/// Fixed by the embedding contract regardless of queue backlog.
pub const IDLE_BUDGET_SECONDS: f64 = 1.0 / 60.0;

/// Owned unit of work, consumed exactly once.
pub enum Task {
    /// Runs with no arguments as soon as its turn comes up.
    Immediate(Box<dyn FnOnce() + Send + 'static>),
    /// Runs with an advisory deadline in clock seconds. The closure is
    /// expected, not forced, to yield before the deadline.
    Idle(Box<dyn FnOnce(f64) + Send + 'static>),
}

/// Variant tag, used for routing decisions and event metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// No deadline; plain closure.
    Immediate,
    /// Deadline-carrying closure.
    Idle,
}

impl Task {
    /// Wraps a plain closure into an immediate task.
    pub fn immediate(f: impl FnOnce() + Send + 'static) -> Self {
        Task::Immediate(Box::new(f))
    }

    /// Wraps a deadline-receiving closure into an idle task.
    pub fn idle(f: impl FnOnce(f64) + Send + 'static) -> Self {
        Task::Idle(Box::new(f))
    }

    /// Returns the variant tag.
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::Immediate(_) => TaskKind::Immediate,
            Task::Idle(_) => TaskKind::Idle,
        }
    }

    /// Consumes the task and invokes its closure.
    ///
    /// Idle closures receive `clock.now_seconds() + IDLE_BUDGET_SECONDS`,
    /// sampled at this call, so the deadline is always at or past the moment
    /// the task actually starts.
    pub(crate) fn run(self, clock: &MonotonicClock) {
        match self {
            Task::Immediate(f) => f(),
            Task::Idle(f) => f(clock.now_seconds() + IDLE_BUDGET_SECONDS),
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Task").field(&self.kind()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_immediate_runs_closure() {
        let clock = MonotonicClock::start();
        let flag = std::sync::Arc::new(AtomicBool::new(false));
        let seen = flag.clone();

        let task = Task::immediate(move || seen.store(true, Ordering::SeqCst));
        assert_eq!(task.kind(), TaskKind::Immediate);

        task.run(&clock);
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_idle_deadline_is_one_frame_ahead() {
        let clock = MonotonicClock::start();
        let before = clock.now_seconds();
        let captured = std::sync::Arc::new(std::sync::Mutex::new(0.0_f64));
        let slot = captured.clone();
        Task::idle(move |deadline| *slot.lock().unwrap() = deadline).run(&clock);

        let deadline = *captured.lock().unwrap();
        assert!(deadline + 1e-9 >= before + IDLE_BUDGET_SECONDS);
    }
}
