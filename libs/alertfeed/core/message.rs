//! Inbound alert message type
//!
//! The transport delivers UTF-8 JSON text frames in camelCase. Frames are
//! validated into [`AlertMessage`] at receipt; anything that does not
//! conform is rejected with [`AlertFeedError::Parse`] and dropped by the
//! driver instead of being trusted as-is.

use crate::traits::{AlertFeedError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single alert event delivered over the transport
///
/// Immutable once received. The feed keeps only the last one; a newer
/// message overwrites the older. Persistence is up to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertMessage {
    pub event_id: String,
    pub event_name: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

impl AlertMessage {
    /// Parse an alert from a raw text frame
    pub fn from_frame(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| AlertFeedError::Parse(e.to_string()))
    }
}
