//! Error types for the Smart Helmet core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Driver ID {id} already exists for another driver")]
    DuplicateId { id: String },

    #[error("Driver {id} not found")]
    RecordNotFound { id: String },

    #[error("Invalid session: name and email are required")]
    InvalidSession,

    #[error("Incorrect email or password.")]
    AuthenticationFailure,

    #[error("Email {email} is already registered")]
    EmailAlreadyRegistered { email: String },

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
