//! Error types for the Taskboard application

use thiserror::Error;

/// Message shown when signing up with an email that already has an account
pub const DUPLICATE_IDENTIFIER_MESSAGE: &str = "This email address is already registered";

/// Message shown for any failed login, whichever factor was wrong
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email or password is incorrect";

/// Message shown for missing, expired or otherwise unusable sessions
pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthorized";

/// Authentication error types
///
/// The display strings are user-facing and stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("This email address is already registered")]
    DuplicateIdentifier,

    #[error("Email or password is incorrect")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthenticated,

    /// Startup-only; never produced while serving a request.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Validation error carrying the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
