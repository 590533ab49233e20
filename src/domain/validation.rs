//! Validation errors and field normalization helpers.
//!
//! Every caller-supplied value passes through these helpers before it reaches
//! storage, so a `ValidationError` never leaves partial state behind.

use std::fmt;

/// Caller-supplied data violates a record invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Creates a validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A required field was empty or whitespace-only.
    pub fn empty_field(field: &str) -> Self {
        Self::new(format!("{} cannot be empty", field))
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Checks that a required body field has visible content.
///
/// The value is returned unchanged: whitespace inside note content and code
/// is significant.
pub(crate) fn require_body(field: &str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value)
}

/// Checks that a required single-line field is non-empty and trims it.
pub(crate) fn require_line(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional field; blank values become `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
