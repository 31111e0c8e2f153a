//! Error types used by the tasklane runtime.
//!
//! Submission operations are fire-and-forget and never report failures to the
//! caller: a task closure failing is the closure's own concern, and submitting
//! foreground work after disposal has begun is a contract violation that
//! asserts instead of returning. The only fallible surface is bringing the
//! scheduler up, covered by [`RuntimeError`].

use std::io;
use thiserror::Error;

/// # Errors raised while starting the scheduler.
///
/// Both variants wrap the OS-level failure to spawn the threads backing one
/// of the two execution lanes.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The background worker pool could not be started.
    #[error("failed to start background pool: {source}")]
    PoolStart {
        /// The underlying OS error.
        source: io::Error,
    },

    /// The foreground run-loop thread could not be started.
    #[error("failed to start foreground run-loop: {source}")]
    ForegroundStart {
        /// The underlying OS error.
        source: io::Error,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use std::io;
    /// use tasklane::RuntimeError;
    ///
    /// let err = RuntimeError::PoolStart {
    ///     source: io::Error::other("boom"),
    /// };
    /// assert_eq!(err.as_label(), "pool_start_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::PoolStart { .. } => "pool_start_failed",
            RuntimeError::ForegroundStart { .. } => "foreground_start_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::PoolStart { source } => format!("background pool: {source}"),
            RuntimeError::ForegroundStart { source } => format!("foreground run-loop: {source}"),
        }
    }
}
