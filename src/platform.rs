//! # Platform adapter: the engine-facing boundary.
//!
//! [`Platform`] implements the scheduling callbacks an embedded script engine
//! demands from its host by pure delegation to [`Scheduler`], and owns the
//! engine-lifecycle collaborator:
//!
//! ```text
//! call_on_background_thread ──────────► Scheduler::submit_background
//! call_on_foreground_thread ──────────► Scheduler::submit_foreground
//! call_delayed_on_foreground_thread ──► Scheduler::submit_delayed
//! call_idle_on_foreground_thread ─────► Scheduler::submit_idle
//! monotonically_increasing_time ──────► Scheduler::monotonic_time
//! report_fatal_error ─────────────────► event bus + host ReportFatal channel
//! ```
//!
//! Construction brings the engine up ([`EngineRuntime::initialize`]), runs
//! its bootstrap under the acquired context, and registers the host's
//! fatal-error channel. Destruction begins disposal, tears down engine-owned
//! resources under the context, then releases the scheduler — in that order.
//!
//! The engine's own execution semantics, capability bundles, and buffer
//! allocation live behind the [`EngineRuntime`] collaborator, not here.

use std::sync::Arc;
use std::time::Duration;

use crate::config::SchedulerConfig;
use crate::context::{ContextGuard, ContextHandle};
use crate::core::Scheduler;
use crate::error::RuntimeError;
use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use crate::tasks::Task;

/// Engine runtime collaborator: init and teardown of the engine itself.
///
/// The adapter drives this trait; it never reimplements engine semantics.
pub trait EngineRuntime: Send + Sync + 'static {
    /// Brings the engine up and returns the handle of its single foreground
    /// execution context.
    fn initialize(&self) -> ContextHandle;

    /// Loads the engine's baseline runtime state. Called once at adapter
    /// construction with the context acquired.
    fn bootstrap(&self) {}

    /// Tears down engine-owned resources. Called with the context acquired,
    /// after disposal has begun and before the scheduler is released.
    fn teardown(&self);
}

/// Host-side channel for engine-fatal reports.
///
/// Reports are forwarded exactly as received; whether to abort is host
/// policy. Nothing here retries or recovers.
pub trait ReportFatal: Send + Sync + 'static {
    /// Receives one fatal report from the engine.
    fn fatal(&self, location: &str, message: &str);
}

/// The scheduling platform handed to an embedded engine.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use tasklane::{
///     ContextHandle, EngineRuntime, ExecutionContext, Platform, ReportFatal,
///     SchedulerConfig, Task,
/// };
///
/// struct StubContext;
/// impl ExecutionContext for StubContext {
///     fn acquire(&self) {}
///     fn release(&self) {}
/// }
///
/// struct StubEngine;
/// impl EngineRuntime for StubEngine {
///     fn initialize(&self) -> ContextHandle {
///         Arc::new(StubContext)
///     }
///     fn teardown(&self) {}
/// }
///
/// struct StderrFatal;
/// impl ReportFatal for StderrFatal {
///     fn fatal(&self, location: &str, message: &str) {
///         eprintln!("fatal: {location}: {message}");
///     }
/// }
///
/// fn main() -> Result<(), tasklane::RuntimeError> {
///     let platform = Platform::new(StubEngine, Arc::new(StderrFatal), SchedulerConfig::default())?;
///     let context = platform.context();
///     platform.call_on_foreground_thread(context, Task::immediate(|| {}));
///     Ok(())
/// }
/// ```
pub struct Platform<E: EngineRuntime> {
    // Declaration order is drop order: the scheduler drops first, joining
    // both lanes while the engine handle is still alive.
    scheduler: Scheduler,
    engine: E,
    context: ContextHandle,
    on_fatal: Arc<dyn ReportFatal>,
}

impl<E: EngineRuntime> Platform<E> {
    /// Builds the platform: starts a scheduler, initializes the engine, and
    /// runs its bootstrap under the acquired context.
    pub fn new(
        engine: E,
        on_fatal: Arc<dyn ReportFatal>,
        config: SchedulerConfig,
    ) -> Result<Self, RuntimeError> {
        Self::with_subscribers(engine, on_fatal, config, Vec::new())
    }

    /// Same as [`Platform::new`] with event subscribers attached.
    pub fn with_subscribers(
        engine: E,
        on_fatal: Arc<dyn ReportFatal>,
        config: SchedulerConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Result<Self, RuntimeError> {
        let scheduler = Scheduler::with_subscribers(config, subscribers)?;
        let context = engine.initialize();
        {
            let _guard = ContextGuard::enter(context.as_ref());
            engine.bootstrap();
        }
        Ok(Self {
            scheduler,
            engine,
            context,
            on_fatal,
        })
    }

    /// The single foreground execution context this platform schedules
    /// against.
    pub fn context(&self) -> ContextHandle {
        self.context.clone()
    }

    /// The scheduler backing this platform.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Engine callback: run `task` on some background worker.
    pub fn call_on_background_thread(&self, task: Task) {
        self.scheduler.submit_background(task);
    }

    /// Engine callback: run `task` on the foreground timeline with `context`
    /// acquired.
    pub fn call_on_foreground_thread(&self, context: ContextHandle, task: Task) {
        self.scheduler.submit_foreground(context, task);
    }

    /// Engine callback: run `task` on the foreground timeline no earlier
    /// than `delay` from now.
    pub fn call_delayed_on_foreground_thread(
        &self,
        context: ContextHandle,
        task: Task,
        delay: Duration,
    ) {
        self.scheduler.submit_delayed(context, task, delay);
    }

    /// Engine callback: run an idle task on the foreground timeline with a
    /// computed advisory deadline.
    pub fn call_idle_on_foreground_thread(&self, context: ContextHandle, task: Task) {
        self.scheduler.submit_idle(context, task);
    }

    /// Engine callback: idle scheduling is always available on this
    /// platform.
    pub fn idle_tasks_enabled(&self) -> bool {
        true
    }

    /// Engine callback: seconds since platform construction, millisecond
    /// rounded.
    pub fn monotonically_increasing_time(&self) -> f64 {
        self.scheduler.monotonic_time()
    }

    /// Engine callback: a fatal engine error. Published on the event bus and
    /// forwarded to the host channel; never intercepted further.
    pub fn report_fatal_error(&self, location: &str, message: &str) {
        self.scheduler.bus().publish(
            Event::now(EventKind::FatalError).with_detail(format!("{location}: {message}")),
        );
        self.on_fatal.fatal(location, message);
    }
}

impl<E: EngineRuntime> Drop for Platform<E> {
    /// Teardown mirrors construction in reverse: stop accepting foreground
    /// work, tear down engine resources under the context, then let the
    /// scheduler field drop (joining the run-loop and pool).
    fn drop(&mut self) {
        self.scheduler.begin_dispose();
        let _guard = ContextGuard::enter(self.context.as_ref());
        self.engine.teardown();
    }
}
