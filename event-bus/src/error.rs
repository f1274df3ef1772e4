//! Error types for the event bus

use thiserror::Error;

/// Result type for event bus operations
pub type Result<T> = std::result::Result<T, Error>;

/// Event bus errors
#[derive(Error, Debug)]
pub enum Error {
    /// Subscriber failed while handling an event
    #[error("Subscriber error: {0}")]
    Subscriber(String),

    /// Payload serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Subscriber(msg)
    }
}
