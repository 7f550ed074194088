//! Core alert feed implementation
//!
//! The feed is a handle over a single *connect cycle*: a tokio task that
//! owns the transport (real WebSocket or simulated generator), publishes
//! status transitions and the last validly-parsed alert, and schedules
//! retries after disconnection.
//!
//! ## Example
//!
//! ```rust,ignore
//! use alertfeed::{AlertFeed, FeedConfig, FeedEvent};
//!
//! #[tokio::main]
//! async fn main() {
//!     let feed = AlertFeed::connect(FeedConfig::from_env());
//!
//!     while let Ok(event) = feed.recv_event() {
//!         if let FeedEvent::Alert(alert) = event {
//!             println!("[{}] {}: {}", alert.severity, alert.event_name, alert.message);
//!         }
//!     }
//!
//!     feed.shutdown().await;
//! }
//! ```

pub mod config;
pub mod connection_state;
pub mod driver;
pub mod feed;
pub mod message;
pub mod simulated;

// Re-export main types
pub use config::FeedConfig;
pub use connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};
pub use feed::{AlertFeed, FeedEvent, Metrics};
pub use message::{AlertMessage, Severity};
