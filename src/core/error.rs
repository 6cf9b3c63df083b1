//! Error types for the application

use crate::core::Resource;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {resource} usage must be finite and non-negative, got {value}")]
    InvalidInput { resource: Resource, value: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not logged in")]
    NotLoggedIn,
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
