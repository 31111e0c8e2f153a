//! # Monotonic clock anchored at scheduler construction.
//!
//! [`MonotonicClock`] converts [`Instant`] deltas into the `f64` seconds that
//! embedding engines expect from their time callback. Sampling happens at
//! microsecond-or-finer resolution and is collapsed to millisecond-rounded
//! seconds, so two reads within the same millisecond return the same value.
//!
//! ## Rules
//! - Values never decrease across calls (monotonic host clock).
//! - The zero point is the instant the clock was anchored, not process start.
//! - Cheap to copy; components carry their own copy instead of sharing a
//!   process-wide time source.

use std::time::Instant;

/// Monotonic time source shared by both execution lanes.
///
/// ## Example
/// ```rust
/// use tasklane::MonotonicClock;
///
/// let clock = MonotonicClock::start();
/// let a = clock.now_seconds();
/// let b = clock.now_seconds();
/// assert!(b >= a);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Anchors a new clock at the current instant.
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Seconds elapsed since the anchor, collapsed to whole milliseconds.
    ///
    /// The microsecond delta is integer-divided down to milliseconds before
    /// the floating-point conversion, which keeps repeated reads stable for
    /// callers that compare or cache the value.
    pub fn now_seconds(&self) -> f64 {
        let micros = self.origin.elapsed().as_micros();
        ((micros / 1_000) as f64) / 1_000.0
    }
}
