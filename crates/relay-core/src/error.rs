use thiserror::Error;

/// Top-level error type for the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration error. Fatal at startup.
    #[error("config error: {0}")]
    Config(String),

    /// The completion API returned a non-2xx status or an unusable body.
    #[error("api error: {0}")]
    Api(String),

    /// Network-level failure reaching the completion API.
    #[error("transport error: {0}")]
    Transport(String),

    /// Sending a message to a specific chat failed (e.g. blocked bot).
    #[error("delivery error: {0}")]
    Delivery(String),

    /// Error inside the messaging channel itself (polling, parsing).
    #[error("channel error: {0}")]
    Channel(String),

    /// Memory/storage error.
    #[error("memory error: {0}")]
    Memory(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
