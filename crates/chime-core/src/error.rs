//! Unified error types for Chime.

use thiserror::Error;

/// Result type alias using ChimeError.
pub type Result<T> = std::result::Result<T, ChimeError>;

#[derive(Error, Debug)]
pub enum ChimeError {
    // Payload errors
    #[error("No schedule payload in bag")]
    MissingSchedule,

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Duplicate payload: {0}")]
    DuplicatePayload(String),

    // Channel errors
    #[error("Channel error: {0}")]
    Channel(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChimeError {
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
