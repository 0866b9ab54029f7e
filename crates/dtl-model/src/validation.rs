use thiserror::Error;
use validator::ValidateEmail;

/// A payload field rejected before it was sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Validate email format using the validator crate
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::new("Email cannot be empty"));
    }

    if !email.validate_email() {
        return Err(ValidationError::new("Invalid email format"));
    }

    Ok(())
}

/// Reject blank values for a required field
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} cannot be empty")));
    }

    Ok(())
}
