//! CrisisWatch - real-time crisis-alert monitoring
//!
//! This crate is the thin presentation layer over the alert feed subsystem:
//! logging setup and the `alert_monitor` binary. All feed behavior lives in
//! the `alertfeed` workspace library.

// Re-export the workspace library for convenience
pub use alertfeed;

pub mod logging;
