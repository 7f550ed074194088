//! Alert feed monitor
//!
//! Connects to the configured alert WebSocket (`ALERT_WS_URL`) and logs
//! incoming alerts and connection transitions. Without the variable set it
//! runs against the simulated feed.

use alertfeed::{AlertFeed, FeedConfig, FeedEvent};
use anyhow::Result;
use crisiswatch::logging::init_tracing;
use crossbeam_channel::RecvTimeoutError;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = FeedConfig::from_env();
    match config.endpoint_url() {
        Some(url) => info!("Using alert endpoint {}", url),
        None => info!("No endpoint configured, using simulated feed"),
    }

    let feed = AlertFeed::connect(config);
    let events = feed.events();

    println!("Monitoring alert feed...");
    println!("Press Ctrl+C to stop\n");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                break;
            }

            event = async {
                let rx = events.clone();
                tokio::task::spawn_blocking(move || {
                    rx.recv_timeout(Duration::from_millis(250))
                })
                .await
                .ok()
            } => {
                match event {
                    Some(Ok(FeedEvent::Alert(alert))) => {
                        info!(
                            "[{}] {} - {}",
                            alert.severity, alert.event_name, alert.message
                        );
                    }
                    Some(Ok(FeedEvent::Connected)) => {
                        info!("Feed connected");
                    }
                    Some(Ok(FeedEvent::Disconnected)) => {
                        warn!("Feed disconnected");
                    }
                    Some(Ok(FeedEvent::Reconnecting(attempt))) => {
                        info!("Reconnecting (attempt {})", attempt);
                    }
                    Some(Err(RecvTimeoutError::Timeout)) => {}
                    Some(Err(RecvTimeoutError::Disconnected)) | None => {
                        break;
                    }
                }
            }
        }
    }

    feed.shutdown().await;
    println!("Shutdown complete");
    Ok(())
}
