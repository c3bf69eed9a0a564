//! Usages

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::{
    proposals::codec,
    uuids::TypedUuid,
    validation::{ValidationError, optional_text, required_text},
};

/// Usage UUID
pub type UsageUuid = TypedUuid<Usage>;

/// Status given to usages created without one.
pub const DEFAULT_USAGE_STATUS: &str = "Active";

/// A recorded session of a tool being used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// Usage UUID
    pub id: UsageUuid,

    /// Tool that was used
    pub tool_name: String,

    /// Person who used it
    pub user_name: String,

    /// Free-text reason, possibly empty
    #[serde(default)]
    pub purpose: String,

    /// Session start as sent by the client
    pub start_at_iso: String,

    /// Session length in whole minutes
    pub duration_minutes: u32,

    /// Session status, `Active` unless set
    pub status: String,
}

impl Usage {
    /// Build a stored record from validated fields.
    #[must_use]
    pub fn from_new(id: UsageUuid, usage: NewUsage) -> Self {
        let NewUsage {
            tool_name,
            user_name,
            purpose,
            start_at_iso,
            duration_minutes,
            status,
        } = usage;

        Self {
            id,
            tool_name,
            user_name,
            purpose,
            start_at_iso,
            duration_minutes,
            status,
        }
    }
}

/// Raw usage fields as posted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageInput {
    /// Tool name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// User name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Purpose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    /// Session start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at_iso: Option<String>,

    /// Duration in minutes; any JSON number or numeric string
    #[serde(default, with = "codec::amount", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<Decimal>,

    /// Status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UsageInput {
    /// Validate the fields of a usage being recorded.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for absent or blank required
    /// fields and [`ValidationError::InvalidDuration`] for a negative or
    /// fractional duration.
    pub fn validate_new(&self) -> Result<NewUsage, ValidationError> {
        let tool_name = required_text(self.tool_name.as_deref(), "toolName")?;
        let user_name = required_text(self.user_name.as_deref(), "userName")?;
        let start_at_iso = required_text(self.start_at_iso.as_deref(), "startAtIso")?;
        let duration_minutes = self
            .duration_minutes
            .ok_or(ValidationError::MissingField("durationMinutes"))
            .and_then(whole_minutes)?;

        let status = optional_text(self.status.as_deref());

        Ok(NewUsage {
            tool_name,
            user_name,
            purpose: optional_text(self.purpose.as_deref()),
            start_at_iso,
            duration_minutes,
            status: if status.is_empty() {
                DEFAULT_USAGE_STATUS.to_owned()
            } else {
                status
            },
        })
    }
}

/// Minutes must be a whole, non-negative number that fits a `u32`.
fn whole_minutes(minutes: Decimal) -> Result<u32, ValidationError> {
    if minutes < Decimal::ZERO || !minutes.fract().is_zero() {
        return Err(ValidationError::InvalidDuration);
    }

    minutes.to_u32().ok_or(ValidationError::InvalidDuration)
}

/// Usage fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUsage {
    /// Trimmed tool name
    pub tool_name: String,

    /// Trimmed user name
    pub user_name: String,

    /// Trimmed purpose, possibly empty
    pub purpose: String,

    /// Trimmed session start
    pub start_at_iso: String,

    /// Whole minutes
    pub duration_minutes: u32,

    /// Status, defaulted to `Active`
    pub status: String,
}
