//! Input validation functions
//!
//! Plain functions over request fields. Each returns the first problem
//! found as a [`FieldError`] naming the field.

use crate::errors::FieldError;
use crate::types::{AuthRequest, CreateTaskRequest, UpdateTaskRequest, UpdateUserRequest};
use validator::ValidateEmail;

pub const MIN_PASSWORD_LENGTH: usize = 5;
/// bcrypt ignores everything past 72 bytes
pub const MAX_PASSWORD_BYTES: usize = 72;
pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;
pub const MAX_NICK_NAME_LENGTH: usize = 64;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::new("email", "Email cannot be empty"));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(FieldError::new("email", "Email too long"));
    }
    if !email.validate_email() {
        return Err(FieldError::new("email", "Invalid email format"));
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FieldError::new(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(FieldError::new(
            "password",
            format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES),
        ));
    }
    Ok(())
}

/// Validate task title
pub fn validate_title(title: &str) -> Result<(), FieldError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(FieldError::new("title", "Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(FieldError::new("title", "Title too long"));
    }
    Ok(())
}

/// Validate task description
pub fn validate_description(description: &str) -> Result<(), FieldError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(FieldError::new("description", "Description too long"));
    }
    Ok(())
}

/// Validate nick name
pub fn validate_nick_name(nick_name: &str) -> Result<(), FieldError> {
    if nick_name.chars().count() > MAX_NICK_NAME_LENGTH {
        return Err(FieldError::new("nick_name", "Nick name too long"));
    }
    Ok(())
}

// ============================================================================
// Request validation
// ============================================================================

pub fn validate_auth_request(req: &AuthRequest) -> Result<(), FieldError> {
    validate_email(&req.email)?;
    validate_password(&req.password)
}

pub fn validate_create_task(req: &CreateTaskRequest) -> Result<(), FieldError> {
    validate_title(&req.title)?;
    if let Some(description) = &req.description {
        validate_description(description)?;
    }
    Ok(())
}

pub fn validate_update_task(req: &UpdateTaskRequest) -> Result<(), FieldError> {
    if let Some(title) = &req.title {
        validate_title(title)?;
    }
    if let Some(description) = &req.description {
        validate_description(description)?;
    }
    Ok(())
}

pub fn validate_update_user(req: &UpdateUserRequest) -> Result<(), FieldError> {
    if let Some(nick_name) = &req.nick_name {
        validate_nick_name(nick_name)?;
    }
    Ok(())
}
