//! Delayed-submission scenarios: the lower bound is a hard guarantee.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tasklane::{ContextHandle, ExecutionContext, Scheduler, SchedulerConfig, Task};

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
fn test_delayed_task_never_fires_early() {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    let context: ContextHandle = Arc::new(NoopContext);
    let ran_at = Arc::new(Mutex::new(None::<Instant>));

    let submitted_at = Instant::now();
    let slot = ran_at.clone();
    scheduler.submit_delayed(
        context,
        Task::immediate(move || {
            *slot.lock().unwrap() = Some(Instant::now());
        }),
        Duration::from_millis(100),
    );

    wait_until(Duration::from_secs(5), || ran_at.lock().unwrap().is_some());

    let ran_at = ran_at.lock().unwrap().unwrap();
    assert!(
        ran_at.duration_since(submitted_at) >= Duration::from_millis(100),
        "delayed task fired before its deadline"
    );
}

#[test]
fn test_zero_delay_fires_on_next_iteration() {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    let context: ContextHandle = Arc::new(NoopContext);
    let ran = Arc::new(Mutex::new(false));

    let slot = ran.clone();
    scheduler.submit_delayed(
        context,
        Task::immediate(move || *slot.lock().unwrap() = true),
        Duration::ZERO,
    );

    wait_until(Duration::from_secs(5), || *ran.lock().unwrap());
}

#[test]
fn test_delayed_tasks_fire_once_each() {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    let context: ContextHandle = Arc::new(NoopContext);
    let fired = Arc::new(Mutex::new(Vec::new()));

    for i in 0..10_usize {
        let fired = fired.clone();
        scheduler.submit_delayed(
            context.clone(),
            Task::immediate(move || fired.lock().unwrap().push(i)),
            Duration::from_millis(10 + (i as u64 % 3)),
        );
    }

    wait_until(Duration::from_secs(5), || fired.lock().unwrap().len() >= 10);
    // settle window: a double-fire would land shortly after
    std::thread::sleep(Duration::from_millis(50));

    let mut fired = fired.lock().unwrap().clone();
    fired.sort_unstable();
    assert_eq!(fired, (0..10).collect::<Vec<_>>());
}
