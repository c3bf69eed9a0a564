//! Proposal request and response bodies

use grantboard::proposals::{Proposal, ProposalInput, codec};
use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Proposal fields as submitted by the tracker form.
///
/// Every field may be omitted; the service decides which are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProposalRequest {
    /// Proposal title
    #[serde(default)]
    pub title: Option<String>,

    /// Principal investigator
    #[serde(default)]
    pub principal_investigator: Option<String>,

    /// Funding agency
    #[serde(default)]
    pub funding_agency: Option<String>,

    /// Requested amount in US dollars; numeric strings are accepted
    #[serde(default, with = "codec::amount")]
    #[salvo(schema(value_type = Option<f64>))]
    pub requested_amount: Option<Decimal>,

    /// Submission deadline, `YYYY-MM-DD` or an ISO-8601 instant
    #[serde(default)]
    pub submission_deadline: Option<String>,

    /// One of `draft`, `submitted`, `under-review`, `approved`, `rejected`
    #[serde(default)]
    pub status: Option<String>,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ProposalRequest> for ProposalInput {
    fn from(request: ProposalRequest) -> Self {
        ProposalInput {
            title: request.title,
            principal_investigator: request.principal_investigator,
            funding_agency: request.funding_agency,
            requested_amount: request.requested_amount,
            submission_deadline: request.submission_deadline,
            status: request.status,
            description: request.description,
        }
    }
}

/// A stored proposal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProposalResponse {
    /// Proposal id
    pub id: Uuid,

    pub title: String,

    pub principal_investigator: String,

    pub funding_agency: String,

    /// Requested amount in US dollars
    #[serde(with = "codec::required_amount")]
    #[salvo(schema(value_type = f64))]
    pub requested_amount: Decimal,

    /// Submission deadline as `YYYY-MM-DD`
    pub submission_deadline: String,

    /// Proposal status
    pub status: String,

    pub description: String,

    /// When the proposal was created (RFC 3339)
    pub created_at: String,

    /// When the proposal was last changed (RFC 3339)
    pub updated_at: String,
}

impl From<Proposal> for ProposalResponse {
    fn from(proposal: Proposal) -> Self {
        ProposalResponse {
            id: proposal.id.into_uuid(),
            title: proposal.title,
            principal_investigator: proposal.principal_investigator,
            funding_agency: proposal.funding_agency,
            requested_amount: proposal.requested_amount,
            submission_deadline: proposal.submission_deadline.to_string(),
            status: proposal.status.as_str().to_owned(),
            description: proposal.description,
            created_at: proposal.created_at.to_string(),
            updated_at: proposal.updated_at.to_string(),
        }
    }
}
