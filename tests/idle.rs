//! Idle-task and clock scenarios: advisory deadlines and monotonic time.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tasklane::{
    ContextHandle, ExecutionContext, IDLE_BUDGET_SECONDS, Scheduler, SchedulerConfig, Task,
};

struct NoopContext;

impl ExecutionContext for NoopContext {
    fn acquire(&self) {}
    fn release(&self) {}
}

fn wait_until(limit: Duration, mut done: impl FnMut() -> bool) {
    let start = Instant::now();
    while !done() {
        assert!(start.elapsed() < limit, "timed out waiting for tasks");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_idle_deadline_is_one_frame_past_dispatch() {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    let context: ContextHandle = Arc::new(NoopContext);
    let deadline = Arc::new(Mutex::new(None::<f64>));

    let before = scheduler.monotonic_time();
    let slot = deadline.clone();
    scheduler.submit_idle(
        context,
        Task::idle(move |deadline| {
            *slot.lock().unwrap() = Some(deadline);
        }),
    );

    wait_until(Duration::from_secs(5), || deadline.lock().unwrap().is_some());

    let deadline = deadline.lock().unwrap().unwrap();
    // dispatch happened at or after `before`, so the deadline carries at
    // least one full frame beyond it
    assert!(deadline + 1e-9 >= before + IDLE_BUDGET_SECONDS);
}

#[test]
fn test_idle_deadlines_do_not_regress_across_dispatches() {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    let context: ContextHandle = Arc::new(NoopContext);
    let deadlines = Arc::new(Mutex::new(Vec::new()));

    for _ in 0..20 {
        let deadlines = deadlines.clone();
        scheduler.submit_idle(
            context.clone(),
            Task::idle(move |deadline| deadlines.lock().unwrap().push(deadline)),
        );
    }

    wait_until(Duration::from_secs(5), || {
        deadlines.lock().unwrap().len() == 20
    });

    let deadlines = deadlines.lock().unwrap().clone();
    for pair in deadlines.windows(2) {
        assert!(pair[1] >= pair[0], "idle deadline regressed");
    }
}

#[test]
fn test_monotonic_time_never_decreases() {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    let mut prev = scheduler.monotonic_time();
    for _ in 0..1_000 {
        let now = scheduler.monotonic_time();
        assert!(now >= prev);
        prev = now;
    }
}

#[test]
fn test_monotonic_time_is_millisecond_rounded() {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    std::thread::sleep(Duration::from_millis(7));
    let millis = scheduler.monotonic_time() * 1_000.0;
    assert!((millis - millis.round()).abs() < 1e-6);
}
