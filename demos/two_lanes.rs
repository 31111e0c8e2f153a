//! # Example: two_lanes
//!
//! Minimal example driving both timelines of a [`Scheduler`] directly,
//! without a platform adapter.
//!
//! Demonstrates how to:
//! - Submit context-free work to the background pool.
//! - Submit serialized work, delayed work, and idle work to the foreground
//!   run-loop.
//! - Begin disposal and observe the background fast-path.
//!
//! ## Flow
//! ```text
//! Scheduler::new()
//!     ├─► submit_background(..)        (any worker)
//!     ├─► submit_foreground(ctx, ..)   (FIFO, context locked)
//!     ├─► submit_delayed(ctx, .., 50ms)
//!     ├─► submit_idle(ctx, ..)         (deadline = now + 1/60 s)
//!     └─► begin_dispose()
//!          └─► submit_background(..)   (runs right here, synchronously)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example two_lanes
//! ```

use std::sync::Arc;
use std::time::Duration;

use tasklane::{ContextHandle, ExecutionContext, Scheduler, SchedulerConfig, Task};

/// Stand-in for the engine's reentrant context primitive.
struct EngineContext;

impl ExecutionContext for EngineContext {
    fn acquire(&self) {}
    fn release(&self) {}
}

fn main() -> Result<(), tasklane::RuntimeError> {
    let scheduler = Scheduler::new(SchedulerConfig::default())?;
    let context: ContextHandle = Arc::new(EngineContext);

    scheduler.submit_background(Task::immediate(|| {
        println!("[background] compiling off the engine timeline");
    }));

    scheduler.submit_foreground(
        context.clone(),
        Task::immediate(|| {
            println!("[foreground] touching the execution context");
        }),
    );

    scheduler.submit_delayed(
        context.clone(),
        Task::immediate(|| {
            println!("[delayed] fired no earlier than 50ms after submission");
        }),
        Duration::from_millis(50),
    );

    scheduler.submit_idle(
        context,
        Task::idle(|deadline| {
            println!("[idle] advisory deadline at {deadline:.3}s on the scheduler clock");
        }),
    );

    // give the timelines a moment before tearing down
    std::thread::sleep(Duration::from_millis(200));

    scheduler.begin_dispose();
    scheduler.submit_background(Task::immediate(|| {
        println!("[fast-path] ran synchronously on the submitting thread");
    }));

    Ok(())
}
