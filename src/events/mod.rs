//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the scheduler, the two execution
//! lanes, and the platform adapter.
//!
//! ## Contents
//! - [`EventKind`], [`Event`], [`Lane`] event classification and metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Scheduler` (dispose, fast-path), lane runners (task
//!   panics), `Platform` (engine fatal reports).
//! - **Consumers**: the scheduler's subscriber listener (fans out to
//!   `SubscriberSet`) and any receiver obtained from [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, Lane};
