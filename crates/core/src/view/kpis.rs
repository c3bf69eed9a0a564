//! Summary figures

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{format::format_whole_currency, proposals::{Proposal, ProposalStatus}};

/// Aggregates over the full, unfiltered proposal list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    /// Number of proposals
    pub total: usize,

    /// Proposals with status `approved`
    pub approved: usize,

    /// Proposals still in draft, submitted or under review
    pub pending: usize,

    /// Sum of the requested amounts of approved proposals.
    pub total_funding: Decimal,
}

impl Kpis {
    /// Tally `proposals`.
    pub fn from_proposals<'a, I>(proposals: I) -> Self
    where
        I: IntoIterator<Item = &'a Proposal>,
    {
        proposals.into_iter().fold(Self::default(), |mut kpis, proposal| {
            kpis.total += 1;

            if proposal.status == ProposalStatus::Approved {
                kpis.approved += 1;
                kpis.total_funding += proposal.requested_amount;
            }

            if proposal.status.is_pending() {
                kpis.pending += 1;
            }

            kpis
        })
    }

    /// Total funding in whole dollars, e.g. `$300`.
    #[must_use]
    pub fn total_funding_display(&self) -> String {
        format_whole_currency(self.total_funding)
    }
}
