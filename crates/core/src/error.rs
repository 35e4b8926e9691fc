//! Error types for the stowage engine.

use thiserror::Error;

/// Result type alias for stowage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running a packing problem.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid geometry provided.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid bin model provided.
    #[error("Invalid bin model: {0}")]
    InvalidModel(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Statistics were requested for a configuration that used no bins.
    #[error("No bins were used, statistics are undefined")]
    NoData,
}
