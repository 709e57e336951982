//! Error types for Jira operations

use thiserror::Error;

/// Result type for Jira operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Jira operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport error
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication error
    #[error("Jira authentication error: {0}")]
    Auth(String),

    /// Board not found
    #[error("Board {0} not found")]
    BoardNotFound(u64),

    /// Unexpected HTTP status
    #[error("Jira returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the board schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<boardgraph_core::Error> for Error {
    fn from(err: boardgraph_core::Error) -> Self {
        Error::Config(err.to_string())
    }
}
