//! Error types for the forum engine

use thiserror::Error;

/// Result type for forum operations
pub type Result<T> = std::result::Result<T, Error>;

/// Forum errors
#[derive(Error, Debug)]
pub enum Error {
    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Question not found
    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    /// Answer not found
    #[error("Answer not found: {0}")]
    AnswerNotFound(String),

    /// Operation attempted against an entity whose state forbids it
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Concurrency error (actor mailbox closed, etc.)
    #[error("Concurrency error: {0}")]
    Concurrency(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::InvalidState(msg)
    }
}
