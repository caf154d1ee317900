//! # DomainError
//!
//! Centralized error handling for the note board.
//! Adapters map these to transport-level responses.

use thiserror::Error;

use crate::models::EntryId;

/// The primary error type for every domain and service operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected input (e.g. blank text). The message is safe to show users.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or incorrect admin credential.
    #[error("unauthorized")]
    Unauthorized,

    /// No entry with this id exists at mutation time.
    #[error("entry {0} not found")]
    NotFound(EntryId),

    /// The backing document could not be read or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

/// A specialized Result type for note board logic.
pub type Result<T> = std::result::Result<T, DomainError>;
