//! # AlertFeed
//!
//! Real-time crisis-alert delivery over WebSocket with automatic reconnection.
//!
//! ## Features
//!
//! - **Lock-free status**: connection state and counters live in atomics
//! - **Validated messages**: inbound frames are parsed into a typed alert,
//!   anything malformed is dropped and logged
//! - **Automatic reconnection**: pluggable retry strategies, fixed 5s by default
//! - **Simulated feed**: synthetic alerts when no endpoint is configured,
//!   so consumers can run without a live backend
//! - **Deterministic teardown**: every connect cycle owns its transport and
//!   timers and releases them on drop, shutdown, or reconnect

pub mod core;
pub mod traits;

// Re-export all traits
pub use traits::*;

// Re-export core functionality
pub use core::{
    config::{FeedConfig, ENDPOINT_ENV_VAR},
    connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState},
    feed::{AlertFeed, FeedEvent, Metrics},
    message::{AlertMessage, Severity},
};

/// Type alias for Result with AlertFeedError
pub type Result<T> = std::result::Result<T, traits::AlertFeedError>;
