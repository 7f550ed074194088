//! Feed configuration
//!
//! The only external configuration surface the core depends on is a single
//! environment-style variable selecting the real transport endpoint; its
//! absence selects the simulated feed.

use crate::traits::{FixedDelay, ReconnectionStrategy};
use std::time::Duration;

/// Environment variable naming the real WebSocket endpoint
pub const ENDPOINT_ENV_VAR: &str = "ALERT_WS_URL";

/// Configuration for [`AlertFeed`](crate::AlertFeed)
///
/// Built with setter methods; every field has the production default:
/// 5s fixed reconnect delay, 1.5s simulated startup delay, 30s simulated
/// tick interval with a 0.3 alert probability, no silent fallback.
pub struct FeedConfig {
    pub(crate) endpoint: Option<String>,
    pub(crate) reconnect_strategy: Box<dyn ReconnectionStrategy>,
    pub(crate) fallback_to_simulated: bool,
    pub(crate) simulated_startup_delay: Duration,
    pub(crate) simulated_tick_interval: Duration,
    pub(crate) simulated_alert_probability: f64,
}

impl FeedConfig {
    /// Create a configuration with no endpoint (simulated mode)
    pub fn new() -> Self {
        Self {
            endpoint: None,
            reconnect_strategy: Box::new(FixedDelay::default()),
            fallback_to_simulated: false,
            simulated_startup_delay: Duration::from_millis(1500),
            simulated_tick_interval: Duration::from_secs(30),
            simulated_alert_probability: 0.3,
        }
    }

    /// Build the configuration from the environment
    ///
    /// Reads [`ENDPOINT_ENV_VAR`]; an unset or empty value selects the
    /// simulated feed.
    pub fn from_env() -> Self {
        let endpoint = std::env::var(ENDPOINT_ENV_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty());

        match endpoint {
            Some(url) => Self::new().endpoint(url),
            None => Self::new(),
        }
    }

    /// Set the real transport endpoint (ws:// or wss:// URL)
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Replace the reconnection strategy for the real-transport path
    pub fn reconnect_strategy(mut self, strategy: impl ReconnectionStrategy + 'static) -> Self {
        self.reconnect_strategy = Box::new(strategy);
        self
    }

    /// Fall back to the simulated feed when the real transport cannot be
    /// established
    ///
    /// Off by default: a failed connect surfaces as `disconnected` and the
    /// retry schedule, rather than silently switching feeds.
    pub fn fallback_to_simulated(mut self, enabled: bool) -> Self {
        self.fallback_to_simulated = enabled;
        self
    }

    /// Delay before the simulated feed reports `connected`
    pub fn simulated_startup_delay(mut self, delay: Duration) -> Self {
        self.simulated_startup_delay = delay;
        self
    }

    /// Interval between simulated feed ticks
    pub fn simulated_tick_interval(mut self, interval: Duration) -> Self {
        self.simulated_tick_interval = interval;
        self
    }

    /// Probability of a synthetic alert per simulated tick, clamped to [0, 1]
    pub fn simulated_alert_probability(mut self, probability: f64) -> Self {
        self.simulated_alert_probability = probability.clamp(0.0, 1.0);
        self
    }

    /// Get the configured endpoint, if any
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Check whether a real transport endpoint is configured
    pub fn has_endpoint(&self) -> bool {
        self.endpoint.is_some()
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new()
    }
}
