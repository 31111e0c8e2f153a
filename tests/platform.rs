//! Platform-adapter scenarios: delegation, lifecycle order, fatal channel.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tasklane::{
    ContextHandle, EngineRuntime, ExecutionContext, Platform, ReportFatal, SchedulerConfig, Task,
};

/// Balanced acquire/release counter standing in for the engine lock.
#[derive(Default)]
struct CountingContext {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl ExecutionContext for CountingContext {
    fn acquire(&self) {
        self.acquired.fetch_add(1, Ordering::SeqCst);
    }
    fn release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

struct StubEngine {
    context: Arc<CountingContext>,
    torn_down: Arc<AtomicBool>,
}

impl EngineRuntime for StubEngine {
    fn initialize(&self) -> ContextHandle {
        self.context.clone()
    }

    fn bootstrap(&self) {
        // must run under the context
        assert!(
            self.context.acquired.load(Ordering::SeqCst)
                > self.context.released.load(Ordering::SeqCst)
        );
    }

    fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct FatalLog {
    reports: Mutex<Vec<(String, String)>>,
}

impl ReportFatal for FatalLog {
    fn fatal(&self, location: &str, message: &str) {
        self.reports
            .lock()
            .unwrap()
            .push((location.to_string(), message.to_string()));
    }
}

fn wait_until(limit: Duration, mut done: impl FnMut() -> bool) {
    let start = Instant::now();
    while !done() {
        assert!(start.elapsed() < limit, "timed out waiting for tasks");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn stub_platform() -> (Platform<StubEngine>, Arc<CountingContext>, Arc<AtomicBool>) {
    let context = Arc::new(CountingContext::default());
    let torn_down = Arc::new(AtomicBool::new(false));
    let engine = StubEngine {
        context: context.clone(),
        torn_down: torn_down.clone(),
    };
    let platform = Platform::new(
        engine,
        Arc::new(FatalLog::default()),
        SchedulerConfig::default(),
    )
    .unwrap();
    (platform, context, torn_down)
}

#[test]
fn test_construction_bootstraps_under_the_context() {
    let (platform, context, _) = stub_platform();
    assert_eq!(
        context.acquired.load(Ordering::SeqCst),
        context.released.load(Ordering::SeqCst),
        "context left locked after construction"
    );
    assert!(context.acquired.load(Ordering::SeqCst) >= 1);
    assert!(platform.idle_tasks_enabled());
}

#[test]
fn test_foreground_delegation_locks_the_context() {
    let (platform, context, _) = stub_platform();
    let handle = platform.context();
    let baseline = context.acquired.load(Ordering::SeqCst);

    platform.call_on_foreground_thread(handle, Task::immediate(|| {}));

    wait_until(Duration::from_secs(5), || {
        context.acquired.load(Ordering::SeqCst) > baseline
    });
    wait_until(Duration::from_secs(5), || {
        context.acquired.load(Ordering::SeqCst) == context.released.load(Ordering::SeqCst)
    });
}

#[test]
fn test_drop_tears_down_engine_and_stops_submissions() {
    let (platform, _, torn_down) = stub_platform();
    assert!(!torn_down.load(Ordering::SeqCst));
    drop(platform);
    assert!(torn_down.load(Ordering::SeqCst), "engine survived platform drop");
}

#[test]
fn test_fatal_reports_reach_the_host_channel() {
    let context = Arc::new(CountingContext::default());
    let engine = StubEngine {
        context: context.clone(),
        torn_down: Arc::new(AtomicBool::new(false)),
    };
    let sink = Arc::new(FatalLog::default());
    let platform = Platform::new(engine, sink.clone(), SchedulerConfig::default()).unwrap();

    platform.report_fatal_error("engine/heap", "allocation failed");

    let reports = sink.reports.lock().unwrap();
    assert_eq!(
        reports.as_slice(),
        &[("engine/heap".to_string(), "allocation failed".to_string())]
    );
}

#[test]
fn test_monotonically_increasing_time_delegates() {
    let (platform, _, _) = stub_platform();
    let a = platform.monotonically_increasing_time();
    let b = platform.monotonically_increasing_time();
    assert!(b >= a);
    assert!(a >= 0.0);
}
