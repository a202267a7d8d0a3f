//! Error type shared by every helpdesk operation.

use thiserror::Error;

/// Failure cases surfaced by the core and config layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing input.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A referenced id does not resolve to an active record.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record looked up
        entity: &'static str,
        /// Id that failed to resolve
        id: i64,
    },

    /// The requested transition or assignment violates the ticket lifecycle.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Which rule was broken
        message: String,
    },

    /// Settings could not be read or are out of range.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the bad setting
        message: String,
    },

    /// Error bubbled up from `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Error reading a settings file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<validator::ValidationErrors> for Error {
    fn from(value: validator::ValidationErrors) -> Self {
        Error::Validation {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
