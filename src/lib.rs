//! # tasklane
//!
//! **Tasklane** is a cross-thread task scheduler for embedded,
//! single-threaded script engines hosted inside a larger process.
//!
//! The engine requires that all access to its execution context be serialized
//! onto one logical "foreground" timeline, while background work
//! (compilation, GC-adjacent bookkeeping, I/O) runs off that timeline without
//! blocking it. Tasklane accepts task submissions from arbitrary threads and
//! the engine itself, and guarantees each task runs on the correct timeline,
//! in the correct temporal order (immediate, delayed, or idle), exactly once,
//! with safe teardown even while tasks are in flight.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!            any thread                      any thread
//!                │                               │
//!                ▼                               ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Scheduler                                                       │
//! │  - disposing flag (set once, read on every submission)           │
//! │  - MonotonicClock (ms-rounded seconds since construction)        │
//! │  - Bus (broadcast events) ──► SubscriberSet (fan-out workers)    │
//! └───────┬──────────────────────────────────────┬───────────────────┘
//!         ▼                                      ▼
//! ┌──────────────────────┐          ┌──────────────────────────────┐
//! │  BackgroundPool      │          │  ForegroundQueue             │
//! │  worker 1..N         │          │  dedicated run-loop thread   │
//! │  (available          │          │  - FIFO channel (immediate,  │
//! │   parallelism)       │          │    idle)                     │
//! │  no context lock     │          │  - DelayQueue (delayed)      │
//! └──────────────────────┘          │  context acquired per task,  │
//!                                   │  one task at a time          │
//!                                   └──────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Platform::new ──► Scheduler started ──► EngineRuntime::initialize
//!                                              │ (context acquired)
//!                                              └─► bootstrap
//!
//! Platform::drop ──► Scheduler::begin_dispose   (no new foreground work;
//!                       │                        background runs inline)
//!                       ├─► EngineRuntime::teardown (context acquired)
//!                       └─► Scheduler released (run-loop joined, pool down)
//! ```
//!
//! ## Features
//! | Area               | Description                                                   | Key types / traits                      |
//! |--------------------|---------------------------------------------------------------|-----------------------------------------|
//! | **Submission**     | Four fire-and-forget operations covering both timelines.      | [`Scheduler`], [`Task`]                 |
//! | **Context safety** | Reentrant lock bracket around every foreground invocation.    | [`ExecutionContext`], [`ContextHandle`] |
//! | **Timing**         | Monotonic ms-rounded clock; one-shot delayed tasks.           | [`MonotonicClock`]                      |
//! | **Idle work**      | Advisory deadlines one frame ahead of dispatch.               | [`Task::idle`], [`IDLE_BUDGET_SECONDS`] |
//! | **Embedding**      | Engine-mandated callbacks by pure delegation.                 | [`Platform`], [`EngineRuntime`]         |
//! | **Observability**  | Broadcast events with pluggable subscribers.                  | [`Event`], [`Subscribe`]                |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tasklane::{ContextHandle, ExecutionContext, Scheduler, SchedulerConfig, Task};
//!
//! // The engine-provided reentrant context primitive; a no-op stands in here.
//! struct EngineContext;
//!
//! impl ExecutionContext for EngineContext {
//!     fn acquire(&self) {}
//!     fn release(&self) {}
//! }
//!
//! fn main() -> Result<(), tasklane::RuntimeError> {
//!     let scheduler = Scheduler::new(SchedulerConfig::default())?;
//!     let context: ContextHandle = Arc::new(EngineContext);
//!
//!     // Off-timeline work: any worker, no context lock.
//!     scheduler.submit_background(Task::immediate(|| {
//!         // compile a script bundle...
//!     }));
//!
//!     // Serialized engine work, FIFO.
//!     scheduler.submit_foreground(context.clone(), Task::immediate(|| {
//!         // touch the execution context...
//!     }));
//!
//!     // No earlier than 10ms from now, same serialization.
//!     scheduler.submit_delayed(
//!         context.clone(),
//!         Task::immediate(|| { /* timer callback */ }),
//!         Duration::from_millis(10),
//!     );
//!
//!     // Advisory deadline one frame ahead of dispatch.
//!     scheduler.submit_idle(context, Task::idle(|deadline| {
//!         let _ = deadline; // sweep until `deadline`, then yield
//!     }));
//!
//!     scheduler.begin_dispose();
//!     Ok(())
//! }
//! ```

mod clock;
mod config;
mod context;
mod core;
mod error;
mod events;
mod platform;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use clock::MonotonicClock;
pub use config::SchedulerConfig;
pub use context::{ContextHandle, ExecutionContext};
pub use crate::core::Scheduler;
pub use error::RuntimeError;
pub use events::{Bus, Event, EventKind, Lane};
pub use platform::{EngineRuntime, Platform, ReportFatal};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{DelayedTaskRequest, IDLE_BUDGET_SECONDS, Task, TaskKind, TaskRequest};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
