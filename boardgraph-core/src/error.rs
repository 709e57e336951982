//! Error types for boardgraph

use thiserror::Error;

use crate::graph::GraphError;

/// Result type alias for boardgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for boardgraph operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Graph construction error
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Navigation error (bad URL or browser launch failure)
    #[error("Navigation error: {0}")]
    Navigate(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
