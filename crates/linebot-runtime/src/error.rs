//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use linebot_transport::TransportError;

/// Errors that can occur while starting or running the bot.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The client could not be built or the server could not bind.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Failed to install a shutdown signal handler.
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
