//! # Example: embedding
//!
//! Hosts a stub script engine behind the [`Platform`] adapter, with the
//! built-in [`LogWriter`] subscriber attached for visibility.
//!
//! Demonstrates how to:
//! - Implement [`EngineRuntime`] and [`ExecutionContext`] for an engine.
//! - Register a host fatal-error channel via [`ReportFatal`].
//! - Drive the engine-mandated callbacks through the adapter.
//!
//! ## Run
//! ```bash
//! cargo run --example embedding --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tasklane::{
    ContextHandle, EngineRuntime, ExecutionContext, LogWriter, Platform, ReportFatal,
    SchedulerConfig, Subscribe, Task,
};

/// Reentrant lock stand-in: counts balanced acquire/release pairs.
#[derive(Default)]
struct StubContext {
    holds: AtomicUsize,
}

impl ExecutionContext for StubContext {
    fn acquire(&self) {
        self.holds.fetch_add(1, Ordering::SeqCst);
    }
    fn release(&self) {
        self.holds.fetch_sub(1, Ordering::SeqCst);
    }
}

struct StubEngine;

impl EngineRuntime for StubEngine {
    fn initialize(&self) -> ContextHandle {
        println!("[engine] runtime up");
        Arc::new(StubContext::default())
    }

    fn bootstrap(&self) {
        println!("[engine] baseline modules loaded (context held)");
    }

    fn teardown(&self) {
        println!("[engine] runtime down");
    }
}

struct AbortPolicy;

impl ReportFatal for AbortPolicy {
    fn fatal(&self, location: &str, message: &str) {
        eprintln!("[host] fatal from engine: {location}: {message}");
    }
}

fn main() -> Result<(), tasklane::RuntimeError> {
    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    let platform = Platform::with_subscribers(
        StubEngine,
        Arc::new(AbortPolicy),
        SchedulerConfig::default(),
        subscribers,
    )?;

    let context = platform.context();

    platform.call_on_background_thread(Task::immediate(|| {
        println!("[engine] optimizing a hot function off-thread");
    }));

    platform.call_on_foreground_thread(
        context.clone(),
        Task::immediate(|| {
            println!("[engine] running a script tick");
        }),
    );

    platform.call_delayed_on_foreground_thread(
        context.clone(),
        Task::immediate(|| {
            println!("[engine] timer callback");
        }),
        Duration::from_millis(20),
    );

    if platform.idle_tasks_enabled() {
        platform.call_idle_on_foreground_thread(
            context,
            Task::idle(|deadline| {
                println!("[engine] sweeping until {deadline:.3}s");
            }),
        );
    }

    platform.report_fatal_error("demo/nowhere", "this is only a drill");

    std::thread::sleep(Duration::from_millis(200));
    println!(
        "[host] engine clock at {:.3}s",
        platform.monotonically_increasing_time()
    );

    Ok(())
}
