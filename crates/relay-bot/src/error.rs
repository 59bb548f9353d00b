//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] telegram_client::TransportError),

    #[error("Directory error: {0}")]
    Directory(#[from] pairing_directory::DirectoryError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
