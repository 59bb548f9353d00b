//! Pairing directory errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Unknown pairing token: {0}")]
    UnknownToken(String),

    #[error("{name} is already registered")]
    AlreadyRegistered { name: String },

    #[error("Person is not registered")]
    NotRegistered,

    #[error("Invalid pairing: {0}")]
    InvalidPairing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
