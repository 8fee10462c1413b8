//! Error types for the core library.

use thiserror::Error;

use crate::account::ValidationError;

/// Errors that can occur in directory and persistence operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A name, email or password was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Another registered account already uses this email.
    #[error("Email already in use: {0}")]
    DuplicateEmail(String),

    /// No account matches the given email and password.
    #[error("Email or password is incorrect")]
    InvalidCredentials,

    /// The operation needs at least one registered account.
    #[error("No accounts registered")]
    EmptyDirectory,

    /// The operation needs a logged-in account.
    #[error("Login required")]
    NoActiveSession,

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// A persisted record lacks one of its keys.
    #[error("Record is missing field: {0}")]
    MissingField(&'static str),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
