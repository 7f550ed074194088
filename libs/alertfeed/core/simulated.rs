//! Simulated alert feed
//!
//! Stands in for the real transport when no endpoint is configured, so the
//! UI can be demoed without a live backend. After a startup delay the feed
//! reports `connected`, then draws a synthetic alert with fixed probability
//! on every tick. Fully interchangeable with the real driver from the
//! surface's point of view.

use crate::core::config::FeedConfig;
use crate::core::connection_state::ConnectionState;
use crate::core::driver;
use crate::core::feed::{FeedEvent, SharedFeedState};
use crate::core::message::{AlertMessage, Severity};
use chrono::Utc;
use crossbeam_channel::Sender;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

const EVENT_NAMES: &[&str] = &[
    "Tech Conference 2023",
    "Music Festival",
    "Corporate Retreat",
    "Charity Gala",
    "Sports Tournament",
];

const ALERT_TEXTS: &[&str] = &[
    "Weather alert: Strong winds expected in the area.",
    "Security alert: Suspicious activity reported near entrance B.",
    "Medical emergency reported in section C4.",
    "Fire alarm triggered in the west wing.",
    "Traffic congestion reported at main entrance.",
    "Power outage affecting parts of the venue.",
    "VIP guest arrival in 15 minutes, prepare security detail.",
];

const SEVERITIES: &[Severity] = &[
    Severity::Low,
    Severity::Medium,
    Severity::High,
    Severity::Critical,
];

/// Run the simulated feed until the cycle is deactivated
pub(crate) async fn run_feed(
    config: Arc<FeedConfig>,
    shared: Arc<SharedFeedState>,
    active: Arc<AtomicBool>,
    events: Sender<FeedEvent>,
) {
    shared.state.set(ConnectionState::Connecting);

    if !driver::sleep_while_active(config.simulated_startup_delay, &active).await {
        debug!("Cycle deactivated during simulated startup delay");
        return;
    }

    shared.state.set(ConnectionState::Connected);
    let _ = events.send(FeedEvent::Connected);
    info!("Simulated alert feed connected");

    let mut ticker = tokio::time::interval(config.simulated_tick_interval);
    // Skip the immediate first tick and any missed ones
    ticker.tick().await;
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !active.load(Ordering::Acquire) {
                    break;
                }

                let draw: f64 = rand::thread_rng().gen();
                if draw < config.simulated_alert_probability {
                    let alert = synthetic_alert();
                    debug!(
                        "Synthetic alert: {} [{}]",
                        alert.event_name, alert.severity
                    );
                    shared.store_message(alert, &events);
                }
            }

            _ = tokio::time::sleep(std::time::Duration::from_millis(100)) => {
                if !active.load(Ordering::Acquire) {
                    break;
                }
            }
        }
    }

    debug!("Simulated feed exiting");
}

/// Draw a synthetic alert from the enumerated pools
fn synthetic_alert() -> AlertMessage {
    let mut rng = rand::thread_rng();

    AlertMessage {
        event_id: format!("evt_{}", rng.gen_range(0..1_000_000)),
        event_name: EVENT_NAMES[rng.gen_range(0..EVENT_NAMES.len())].to_string(),
        message: ALERT_TEXTS[rng.gen_range(0..ALERT_TEXTS.len())].to_string(),
        severity: SEVERITIES[rng.gen_range(0..SEVERITIES.len())],
        timestamp: Utc::now(),
    }
}
