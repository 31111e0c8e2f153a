//! # Execution-context locking boundary.
//!
//! The engine owns exactly one foreground execution context per scheduler
//! instance, and that context must never be entered concurrently from two
//! threads. The engine exposes a reentrant acquire/release primitive; the
//! scheduler brackets every foreground closure invocation with it, including
//! any nested re-entry the closure triggers and including unwinding.
//!
//! ## Rules
//! - The primitive **must** be reentrant: a foreground closure may call back
//!   into the engine, which may acquire again on the same thread.
//! - The scheduler holds the acquisition for the full closure invocation and
//!   releases it on the way out, panic or not.

use std::sync::Arc;

/// Engine-provided reentrant locking primitive for the foreground context.
///
/// `acquire` blocks until the calling thread holds the context; `release`
/// undoes one acquisition.
pub trait ExecutionContext: Send + Sync + 'static {
    /// Acquires the context for the calling thread.
    fn acquire(&self);

    /// Releases one acquisition made by the calling thread.
    fn release(&self);
}

/// Shared handle to the single foreground execution context.
pub type ContextHandle = Arc<dyn ExecutionContext>;

/// RAII bracket around one foreground closure invocation.
///
/// Releases on drop, so a panicking closure still leaves the context
/// unlocked before the panic is reported.
pub(crate) struct ContextGuard<'a> {
    context: &'a dyn ExecutionContext,
}

impl<'a> ContextGuard<'a> {
    pub(crate) fn enter(context: &'a dyn ExecutionContext) -> Self {
        context.acquire();
        Self { context }
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.context.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicIsize, Ordering};

    struct Balance(AtomicIsize);

    impl ExecutionContext for Balance {
        fn acquire(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
        fn release(&self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_guard_pairs_acquire_release() {
        let ctx = Balance(AtomicIsize::new(0));
        {
            let _guard = ContextGuard::enter(&ctx);
            assert_eq!(ctx.0.load(Ordering::SeqCst), 1);
        }
        assert_eq!(ctx.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_guard_releases_on_panic() {
        let ctx = Balance(AtomicIsize::new(0));
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = ContextGuard::enter(&ctx);
            panic!("task blew up");
        }));
        assert!(result.is_err());
        assert_eq!(ctx.0.load(Ordering::SeqCst), 0);
    }
}
