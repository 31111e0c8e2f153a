//! # Runtime events emitted by the scheduler and its lanes.
//!
//! [`EventKind`] classifies the few things worth observing in a scheduler
//! whose submissions are fire-and-forget: disposal lifecycle, the teardown
//! fast-path, task panics, and engine fatal reports. [`Event`] carries the
//! metadata (lane, task kind, detail text, timestamps).
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use tasklane::{Event, EventKind, Lane, TaskKind};
//!
//! let ev = Event::now(EventKind::TaskPanicked)
//!     .with_lane(Lane::Background)
//!     .with_task_kind(TaskKind::Immediate)
//!     .with_detail("index out of bounds");
//!
//! assert_eq!(ev.kind, EventKind::TaskPanicked);
//! assert_eq!(ev.lane, Some(Lane::Background));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::tasks::TaskKind;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// The two execution timelines a task can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// The serialized run-loop bound to the execution context.
    Foreground,
    /// The context-free worker pool.
    Background,
}

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Disposal has begun; foreground submissions are no longer accepted.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    DisposeStarted,

    /// A background submission ran synchronously on the calling thread
    /// because disposal had already begun.
    ///
    /// Sets:
    /// - `task`: task kind
    /// - `lane`: always [`Lane::Background`]
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    FastPathRun,

    /// A task closure panicked. The lane that ran it is unaffected.
    ///
    /// Sets:
    /// - `lane`: lane the task ran on
    /// - `task`: task kind
    /// - `detail`: panic payload, if it was a string
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TaskPanicked,

    /// The engine reported a fatal error. Forwarded to the host channel,
    /// never recovered.
    ///
    /// Sets:
    /// - `detail`: `location: message`
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    FatalError,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Lane the event refers to, if applicable.
    pub lane: Option<Lane>,
    /// Kind of the task involved, if applicable.
    pub task: Option<TaskKind>,
    /// Human-readable detail (panic payloads, fatal locations).
    pub detail: Option<Arc<str>>,
}

impl Event {
    /// Creates an event of the given kind with the current timestamp and the
    /// next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            lane: None,
            task: None,
            detail: None,
        }
    }

    /// Attaches the lane the event refers to.
    #[inline]
    pub fn with_lane(mut self, lane: Lane) -> Self {
        self.lane = Some(lane);
        self
    }

    /// Attaches the kind of the task involved.
    #[inline]
    pub fn with_task_kind(mut self, task: TaskKind) -> Self {
        self.task = Some(task);
        self
    }

    /// Attaches a human-readable detail.
    #[inline]
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_increases() {
        let a = Event::now(EventKind::DisposeStarted);
        let b = Event::now(EventKind::DisposeStarted);
        assert!(b.seq > a.seq);
    }
}
