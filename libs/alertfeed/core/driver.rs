//! Connection driver
//!
//! One driver task exists per connect cycle. It owns the transport handle,
//! performs status transitions and retry scheduling, and exits as soon as
//! its cycle is deactivated. Delay sleeps are chunked so deactivation is
//! observed within ~100ms on every path.

use crate::core::config::FeedConfig;
use crate::core::connection_state::ConnectionState;
use crate::core::feed::{FeedEvent, SharedFeedState};
use crate::core::message::AlertMessage;
use crate::core::simulated;
use crate::traits::{AlertFeedError, Result};
use crossbeam_channel::Sender;
use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

/// How often waiting code re-checks the cycle's active flag
const ACTIVE_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Run one connect cycle to completion
///
/// Picks the real transport when an endpoint is configured, the simulated
/// feed otherwise. Returns when the cycle is deactivated or the
/// reconnection strategy gives up.
pub(crate) async fn run_cycle(
    config: Arc<FeedConfig>,
    shared: Arc<SharedFeedState>,
    active: Arc<AtomicBool>,
    events: Sender<FeedEvent>,
) {
    let Some(url) = config.endpoint_url().map(str::to_owned) else {
        simulated::run_feed(config, shared, active, events).await;
        return;
    };

    let mut attempt = 0usize;

    loop {
        if !active.load(Ordering::Acquire) {
            debug!("Cycle deactivated, exiting driver loop");
            break;
        }

        shared.state.set(ConnectionState::Connecting);
        if attempt > 0 {
            let _ = events.send(FeedEvent::Reconnecting(attempt));
        }

        match connect_async(url.as_str()).await {
            Ok((ws_stream, _)) => {
                info!("Connected to {}", url);
                shared.state.set(ConnectionState::Connected);
                let _ = events.send(FeedEvent::Connected);
                attempt = 0;

                if let Err(e) = read_frames(ws_stream, &shared, &active, &events).await {
                    warn!("Connection lost: {}", e);
                }

                shared.state.set(ConnectionState::Disconnected);
                let _ = events.send(FeedEvent::Disconnected);
            }
            Err(e) => {
                error!("Failed to connect to {}: {}", url, e);
                shared.state.set(ConnectionState::Disconnected);
                let _ = events.send(FeedEvent::Disconnected);

                if config.fallback_to_simulated {
                    warn!("Real transport unavailable, falling back to simulated feed");
                    simulated::run_feed(config, shared, active, events).await;
                    return;
                }
            }
        }

        if !active.load(Ordering::Acquire) {
            debug!("Cycle deactivated after disconnect, skipping retry");
            break;
        }

        let Some(delay) = config.reconnect_strategy.next_delay(attempt) else {
            warn!("Reconnection strategy exhausted, stopping");
            break;
        };

        info!("Reconnecting in {:?} (attempt {})", delay, attempt + 1);
        if !sleep_while_active(delay, &active).await {
            debug!("Cycle deactivated during retry delay");
            break;
        }

        attempt += 1;
        shared.metrics.increment_reconnects();
    }

    debug!("Driver cycle exiting");
}

/// Sleep for `total`, re-checking the active flag every
/// [`ACTIVE_CHECK_INTERVAL`]
///
/// Returns `false` if the cycle was deactivated during the wait.
pub(crate) async fn sleep_while_active(total: Duration, active: &AtomicBool) -> bool {
    let mut elapsed = Duration::ZERO;

    while elapsed < total {
        if !active.load(Ordering::Acquire) {
            return false;
        }

        let step = ACTIVE_CHECK_INTERVAL.min(total - elapsed);
        tokio::time::sleep(step).await;
        elapsed += step;
    }

    active.load(Ordering::Acquire)
}

/// Read frames from an established connection until it fails or the cycle
/// is deactivated
///
/// Valid text frames update the last-message slot; malformed or binary
/// frames are dropped with a logged warning and no status change.
async fn read_frames(
    ws_stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    shared: &SharedFeedState,
    active: &AtomicBool,
    events: &Sender<FeedEvent>,
) -> Result<()> {
    let (mut write, mut read) = ws_stream.split();

    loop {
        if !active.load(Ordering::Acquire) {
            // Close the transport handle on the teardown path too
            let _ = write.close().await;
            return Ok(());
        }

        tokio::select! {
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match AlertMessage::from_frame(&text) {
                            Ok(alert) => {
                                debug!(
                                    "Alert received: {} [{}]",
                                    alert.event_name, alert.severity
                                );
                                shared.store_message(alert, events);
                            }
                            Err(e) => {
                                shared.metrics.increment_parse_failures();
                                warn!("Dropping malformed frame: {}", e);
                            }
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        shared.metrics.increment_parse_failures();
                        warn!("Dropping unexpected binary frame");
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
                    Some(Ok(Message::Close(_))) => {
                        return Err(AlertFeedError::ConnectionClosed(
                            "close frame received".into(),
                        ));
                    }
                    Some(Err(e)) => {
                        return Err(AlertFeedError::Transport(e.to_string()));
                    }
                    None => {
                        return Err(AlertFeedError::ConnectionClosed("stream ended".into()));
                    }
                }
            }

            // Periodic wake-up so deactivation is noticed on idle connections
            _ = tokio::time::sleep(ACTIVE_CHECK_INTERVAL) => {}
        }
    }
}
