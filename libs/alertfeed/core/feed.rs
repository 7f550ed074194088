//! Alert feed surface
//!
//! [`AlertFeed`] is the handle consuming views mount: it exposes the last
//! received alert, the connection status, a reconnect trigger and an event
//! channel. The handle owns the current connect cycle; dropping it (or
//! calling [`AlertFeed::shutdown`]) deactivates the cycle so no transport
//! handle or timer leaks across remounts.

use crate::core::config::FeedConfig;
use crate::core::connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};
use crate::core::driver;
use crate::core::message::AlertMessage;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// How long shutdown waits for the driver task before aborting it
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Notifications emitted by the driver
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Transport established (real or simulated)
    Connected,
    /// Transport lost or connection attempt failed
    Disconnected,
    /// Retrying the connection (attempt number)
    Reconnecting(usize),
    /// A validly-parsed alert was received
    Alert(AlertMessage),
}

/// Snapshot of feed counters
#[derive(Debug, Clone)]
pub struct Metrics {
    pub messages_received: u64,
    pub parse_failures: u64,
    pub reconnect_count: u64,
    pub connection_state: ConnectionState,
}

/// State shared between the surface and the driver task
pub(crate) struct SharedFeedState {
    pub(crate) state: AtomicConnectionState,
    pub(crate) last_message: Mutex<Option<AlertMessage>>,
    pub(crate) metrics: AtomicMetrics,
}

impl SharedFeedState {
    fn new() -> Self {
        Self {
            state: AtomicConnectionState::new(ConnectionState::Disconnected),
            last_message: Mutex::new(None),
            metrics: AtomicMetrics::new(),
        }
    }

    /// Overwrite the single last-message slot and notify consumers
    ///
    /// Only called with validly-parsed alerts; malformed frames never
    /// reach this point.
    pub(crate) fn store_message(&self, alert: AlertMessage, events: &Sender<FeedEvent>) {
        *self.last_message.lock() = Some(alert.clone());
        self.metrics.increment_received();
        let _ = events.send(FeedEvent::Alert(alert));
    }
}

/// One connect cycle: its driver task and the flag that deactivates it
struct Cycle {
    active: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl Cycle {
    /// Stop the cycle and discard any pending retry timer
    ///
    /// The flag alone stops the driver within one check interval; abort is
    /// the backstop for a connect attempt blocked in flight.
    fn deactivate(self) {
        self.active.store(false, Ordering::Release);
        self.handle.abort();
    }
}

/// Handle over the real-time alert feed
///
/// At most one connect cycle is active per handle; [`AlertFeed::reconnect`]
/// replaces the cycle wholesale so a prior cycle's retry timer can never
/// fire into the new one.
pub struct AlertFeed {
    config: Arc<FeedConfig>,
    shared: Arc<SharedFeedState>,
    event_tx: Sender<FeedEvent>,
    event_rx: Receiver<FeedEvent>,
    cycle: Mutex<Option<Cycle>>,
}

impl AlertFeed {
    /// Start the feed and spawn the first connect cycle
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(config: FeedConfig) -> Self {
        let (event_tx, event_rx) = unbounded();

        let feed = Self {
            config: Arc::new(config),
            shared: Arc::new(SharedFeedState::new()),
            event_tx,
            event_rx,
            cycle: Mutex::new(None),
        };

        feed.shared.state.set(ConnectionState::Connecting);
        feed.spawn_cycle();
        feed
    }

    fn spawn_cycle(&self) {
        let active = Arc::new(AtomicBool::new(true));
        let handle = tokio::spawn(driver::run_cycle(
            Arc::clone(&self.config),
            Arc::clone(&self.shared),
            Arc::clone(&active),
            self.event_tx.clone(),
        ));

        let prev = self.cycle.lock().replace(Cycle { active, handle });
        if let Some(prev) = prev {
            prev.deactivate();
        }
    }

    /// Last validly-parsed alert, if any
    ///
    /// Only ever overwritten by the driver on receipt of a valid frame;
    /// repeated reads between receipts return the same alert.
    pub fn last_message(&self) -> Option<AlertMessage> {
        self.shared.last_message.lock().clone()
    }

    /// Current connection status
    #[inline]
    pub fn connection_status(&self) -> ConnectionState {
        self.shared.state.get()
    }

    /// Check if connected
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.shared.state.is_connected()
    }

    /// Tear down the current cycle and start a fresh connection attempt
    ///
    /// Resets status to `connecting` and discards any pending retry timer
    /// from the prior cycle.
    pub fn reconnect(&self) {
        info!("Reconnect requested");
        let prev = self.cycle.lock().take();
        if let Some(prev) = prev {
            prev.deactivate();
        }

        self.shared.state.set(ConnectionState::Connecting);
        self.spawn_cycle();
    }

    /// Get current metrics
    pub fn metrics(&self) -> Metrics {
        Metrics {
            messages_received: self.shared.metrics.messages_received(),
            parse_failures: self.shared.metrics.parse_failures(),
            reconnect_count: self.shared.metrics.reconnect_count(),
            connection_state: self.shared.state.get(),
        }
    }

    /// Clone the event receiver
    ///
    /// The channel disconnects once the feed and its driver are gone.
    pub fn events(&self) -> Receiver<FeedEvent> {
        self.event_rx.clone()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv_event(&self) -> Option<FeedEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receive an event (blocking)
    pub fn recv_event(&self) -> std::result::Result<FeedEvent, crossbeam_channel::RecvError> {
        self.event_rx.recv()
    }

    /// Shut down the feed gracefully
    ///
    /// Deactivates the cycle, waits briefly for the driver to close its
    /// transport, then aborts it if still blocked.
    pub async fn shutdown(self) {
        info!("Shutting down alert feed");
        self.shared.state.set(ConnectionState::ShuttingDown);

        let cycle = self.cycle.lock().take();
        if let Some(mut cycle) = cycle {
            cycle.active.store(false, Ordering::Release);
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut cycle.handle)
                .await
                .is_err()
            {
                debug!("Driver still blocked after grace period, aborting");
                cycle.handle.abort();
            }
        }

        self.shared.state.set(ConnectionState::Disconnected);
    }
}

impl Drop for AlertFeed {
    fn drop(&mut self) {
        if let Some(cycle) = self.cycle.lock().take() {
            cycle.deactivate();
        }
    }
}
