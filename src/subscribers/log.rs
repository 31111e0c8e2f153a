//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [dispose] teardown started
//! [fast-path] kind=Immediate ran on the submitting thread
//! [panic] lane=Foreground kind=Idle detail="index out of bounds"
//! [fatal] v8/heap: allocation failed
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::DisposeStarted => {
                println!("[dispose] teardown started");
            }
            EventKind::FastPathRun => {
                if let Some(kind) = e.task {
                    println!("[fast-path] kind={kind:?} ran on the submitting thread");
                }
            }
            EventKind::TaskPanicked => {
                println!(
                    "[panic] lane={:?} kind={:?} detail={:?}",
                    e.lane, e.task, e.detail
                );
            }
            EventKind::FatalError => {
                println!("[fatal] {}", e.detail.as_deref().unwrap_or("unknown"));
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
