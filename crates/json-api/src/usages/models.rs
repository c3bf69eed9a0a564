//! Usage request and response bodies

use grantboard::{
    proposals::codec,
    usages::{Usage, UsageInput},
};
use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Usage fields as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsageRequest {
    #[serde(default)]
    pub tool_name: Option<String>,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub purpose: Option<String>,

    /// When the session started, as an ISO-8601 instant
    #[serde(default)]
    pub start_at_iso: Option<String>,

    /// Whole minutes, zero or more; fractions are rejected by validation
    #[serde(default, with = "codec::amount")]
    #[salvo(schema(value_type = Option<f64>))]
    pub duration_minutes: Option<Decimal>,

    /// Defaults to `Active`
    #[serde(default)]
    pub status: Option<String>,
}

impl From<UsageRequest> for UsageInput {
    fn from(request: UsageRequest) -> Self {
        UsageInput {
            tool_name: request.tool_name,
            user_name: request.user_name,
            purpose: request.purpose,
            start_at_iso: request.start_at_iso,
            duration_minutes: request.duration_minutes,
            status: request.status,
        }
    }
}

/// A recorded usage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsageResponse {
    pub id: Uuid,
    pub tool_name: String,
    pub user_name: String,
    pub purpose: String,
    pub start_at_iso: String,
    pub duration_minutes: u32,
    pub status: String,
}

impl From<Usage> for UsageResponse {
    fn from(usage: Usage) -> Self {
        UsageResponse {
            id: usage.id.into_uuid(),
            tool_name: usage.tool_name,
            user_name: usage.user_name,
            purpose: usage.purpose,
            start_at_iso: usage.start_at_iso,
            duration_minutes: usage.duration_minutes,
            status: usage.status,
        }
    }
}
