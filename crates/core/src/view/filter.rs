//! Search and status filtering

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::proposals::Proposal;

/// Filter inputs of the proposal table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalFilter {
    /// Free text matched against title, investigator, agency and description.
    #[serde(default)]
    pub search: String,

    /// Exact status value to keep; empty keeps every status.
    #[serde(default)]
    pub status: String,
}

impl ProposalFilter {
    /// Filter on `search` text and an exact `status` value.
    #[must_use]
    pub fn new(search: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            status: status.into(),
        }
    }

    /// Whether `proposal` passes both the status and the text filter.
    #[must_use]
    pub fn matches(&self, proposal: &Proposal) -> bool {
        if !self.status.is_empty() && proposal.status.as_str() != self.status {
            return false;
        }

        if self.search.trim().is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();

        [
            &proposal.title,
            &proposal.principal_investigator,
            &proposal.funding_agency,
            &proposal.description,
        ]
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

/// Apply `filter` and order the survivors newest first.
///
/// The sort is stable, so records created at the same instant keep their
/// input order.
pub fn filter_proposals<'a, I>(proposals: I, filter: &ProposalFilter) -> Vec<&'a Proposal>
where
    I: IntoIterator<Item = &'a Proposal>,
{
    let mut visible: Vec<&Proposal> = proposals
        .into_iter()
        .filter(|proposal| filter.matches(proposal))
        .collect();

    visible.sort_by_key(|proposal| Reverse(proposal.created_at));

    visible
}
