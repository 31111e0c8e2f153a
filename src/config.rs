//! # Scheduler configuration.
//!
//! [`SchedulerConfig`] controls the size of the background pool and the
//! capacity of the event bus. Defaults match the embedding contract: pool
//! size follows host-reported parallelism.
//!
//! # Example
//! ```
//! use tasklane::SchedulerConfig;
//!
//! let mut cfg = SchedulerConfig::default();
//! cfg.pool_workers = 2;
//!
//! assert_eq!(cfg.pool_workers, 2);
//! ```

/// Global configuration for a [`Scheduler`](crate::Scheduler) instance.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Worker threads in the background pool (0 = host available parallelism,
    /// falling back to 1 if the host cannot report it).
    pub pool_workers: usize,
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
}

impl Default for SchedulerConfig {
    /// Provides a default configuration:
    /// - `pool_workers = 0` (host available parallelism)
    /// - `bus_capacity = 256`
    fn default() -> Self {
        Self {
            pool_workers: 0,
            bus_capacity: 256,
        }
    }
}
