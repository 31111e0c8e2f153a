//! # Run a single request to completion.
//!
//! Executes one [`TaskRequest`], publishes a lifecycle event to [`Bus`] if it
//! panics.
//!
//! - **Execute ONE request** on the calling thread, context bracketed if bound
//! - **Contain panics** so one task's failure cannot take down its lane
//! - **Publish events** for observability (panic only; success is silent)
//!
//! ## Rules
//! - The request is consumed whether the closure completes or panics.
//! - The context guard is released during unwinding, before the panic is
//!   reported, so the context is never left locked.
//! - Queue and pool state stay intact either way (isolation between tasks).

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::clock::MonotonicClock;
use crate::events::{Bus, Event, EventKind, Lane};
use crate::tasks::TaskRequest;

/// Executes `request` on the calling thread, publishing
/// [`EventKind::TaskPanicked`] if its closure panics.
pub(crate) fn run_guarded(request: TaskRequest, clock: &MonotonicClock, bus: &Bus, lane: Lane) {
    let kind = request.kind();
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| request.dispatch(clock))) {
        bus.publish(
            Event::now(EventKind::TaskPanicked)
                .with_lane(lane)
                .with_task_kind(kind)
                .with_detail(panic_detail(payload.as_ref())),
        );
    }
}

/// Best-effort extraction of a panic payload as text.
fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::Task;

    #[test]
    fn test_panicking_request_is_contained() {
        let clock = MonotonicClock::start();
        let bus = Bus::new(8);
        let request = TaskRequest::background(Task::immediate(|| panic!("boom")));
        run_guarded(request, &clock, &bus, Lane::Background);
        // still here: the panic did not unwind past the runner
    }

    #[test]
    fn test_panic_detail_prefers_strings() {
        assert_eq!(panic_detail(&"boom"), "boom");
        assert_eq!(panic_detail(&"boom".to_string()), "boom");
        assert_eq!(panic_detail(&42_u32), "opaque panic payload");
    }
}
