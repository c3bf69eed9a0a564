//! Table rows

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    format::{format_currency, format_date},
    proposals::{Proposal, ProposalUuid},
};

/// Display projection of a proposal for the tracker table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRow {
    /// Proposal UUID
    pub id: ProposalUuid,

    /// Proposal title
    pub title: String,

    /// Principal investigator
    pub principal_investigator: String,

    /// Funding agency
    pub funding_agency: String,

    /// Requested amount, e.g. `$500,000.00`
    pub amount: String,

    /// Submission deadline as month/day/year
    pub deadline: String,

    /// Status label, e.g. `Under Review`
    pub status_label: String,

    /// Style class, e.g. `status-under-review`
    pub status_class: String,

    /// Deadline passed while the proposal is still open
    pub overdue: bool,
}

impl ProposalRow {
    /// Project `proposal` as of `now`.
    #[must_use]
    pub fn at(proposal: &Proposal, now: Timestamp) -> Self {
        Self {
            id: proposal.id,
            title: proposal.title.clone(),
            principal_investigator: proposal.principal_investigator.clone(),
            funding_agency: proposal.funding_agency.clone(),
            amount: format_currency(proposal.requested_amount),
            deadline: format_date(proposal.submission_deadline),
            status_label: proposal.status.label(),
            status_class: format!("status-{}", proposal.status.as_str()),
            overdue: proposal.is_overdue_at(now),
        }
    }
}

impl From<&Proposal> for ProposalRow {
    fn from(proposal: &Proposal) -> Self {
        Self::at(proposal, Timestamp::now())
    }
}
