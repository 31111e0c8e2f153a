//! # Event subscribers for the tasklane runtime.
//!
//! This module provides the [`Subscribe`] trait and the fan-out machinery for
//! handling events broadcast through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   lanes / Scheduler / Platform ── publish(Event) ──► Bus
//!                                                       │
//!                                       subscriber listener (on the pool)
//!                                                       │
//!                                            SubscriberSet::emit(&Event)
//!                                                  ┌────┴────┬────────┐
//!                                                  ▼         ▼        ▼
//!                                              LogWriter  Metrics  Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use tasklane::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct PanicCounter;
//!
//! #[async_trait]
//! impl Subscribe for PanicCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::TaskPanicked {
//!             // increment a counter
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
