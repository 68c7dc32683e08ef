//! Error handling for the war room client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarroomError {
    /// A required URL or key is missing from the configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response arrived but its body was not what the caller needed.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// User input was rejected before anything was sent.
    #[error("{0}")]
    Validation(String),

    /// A collaborator answered with a non-success status.
    #[error("HTTP error with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WarroomError {
    pub fn validation(msg: impl Into<String>) -> Self {
        WarroomError::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        WarroomError::Config(msg.into())
    }
}
