use thiserror::Error;

/// Main error type for alertfeed
#[derive(Error, Debug)]
pub enum AlertFeedError {
    /// WebSocket transport error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Connection closed unexpectedly
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// Inbound frame did not conform to the alert message shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Channel send error
    #[error("Channel send error: {0}")]
    ChannelSend(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for alertfeed operations
pub type Result<T> = std::result::Result<T, AlertFeedError>;
