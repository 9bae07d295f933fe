//! # Uptime Monitor
//!
//! This crate runs the debounce loop that turns noisy probe results into confirmed
//! online/offline transitions. A change is only acted upon after it has been observed
//! on `confirm_time` consecutive re-probes; anything shorter is treated as a flap.

/// Types for the monitor: device states, transitions and configuration.
mod monitor_types;
pub use monitor_types::*;

/// The debounce loop itself.
mod monitor;
pub use monitor::*;
