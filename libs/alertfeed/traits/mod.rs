//! Core traits and types for the alert feed client.
//!
//! - **ReconnectionStrategy**: controls retry delays after disconnection
//! - **AlertFeedError**: error taxonomy for the whole subsystem

pub mod error;
pub mod reconnect;

// Re-export commonly used types
pub use error::{AlertFeedError, Result};
pub use reconnect::{ExponentialBackoff, FixedDelay, NeverReconnect, ReconnectionStrategy};
