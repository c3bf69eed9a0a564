//! Field validation

use thiserror::Error;

/// A submitted field set violates the entity constraints.
///
/// Display strings are safe to show to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or blank after trimming.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The requested amount was zero or negative.
    #[error("requested amount must be greater than zero")]
    NonPositiveAmount,

    /// The status is not one of the known proposal statuses.
    #[error("unknown proposal status `{0}`")]
    InvalidStatus(String),

    /// The submission deadline is neither an ISO date nor an ISO instant.
    #[error("invalid submission deadline `{0}`")]
    InvalidDeadline(String),

    /// The usage duration was negative or out of range.
    #[error("duration must be a whole number of minutes, zero or more")]
    InvalidDuration,
}

impl ValidationError {
    /// Whether this error reports an absent required field.
    pub const fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }
}

/// Trim `value`, failing with [`ValidationError::MissingField`] when it is
/// absent or blank.
pub(crate) fn required_text(
    value: Option<&str>,
    field: &'static str,
) -> Result<String, ValidationError> {
    let trimmed = optional_text(value);

    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    Ok(trimmed)
}

/// Trim `value`, treating absence as the empty string.
pub(crate) fn optional_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_owned()
}
