//! Proposals

use jiff::{
    Timestamp,
    civil::{Date, Time},
    tz::TimeZone,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

pub mod codec;
mod input;
mod status;

pub use input::{NewProposal, ProposalChanges, ProposalFields, ProposalInput};
pub use status::ProposalStatus;

/// Proposal UUID
pub type ProposalUuid = TypedUuid<Proposal>;

/// A stored research grant proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Proposal UUID
    pub id: ProposalUuid,

    /// Proposal title
    pub title: String,

    /// Principal investigator
    pub principal_investigator: String,

    /// Funding agency
    pub funding_agency: String,

    /// Requested amount in US dollars, always positive
    #[serde(with = "codec::required_amount")]
    pub requested_amount: Decimal,

    /// Submission deadline
    #[serde(with = "codec::deadline")]
    pub submission_deadline: Date,

    /// Review status
    pub status: ProposalStatus,

    /// Free-text description, possibly empty
    #[serde(default)]
    pub description: String,

    /// When the record was stored; the epoch for imported records without one
    #[serde(default = "codec::epoch", with = "codec::timestamp")]
    pub created_at: Timestamp,

    /// When the record last changed
    #[serde(default = "codec::epoch", with = "codec::timestamp")]
    pub updated_at: Timestamp,
}

impl Proposal {
    /// Build a stored record from validated fields, stamping both timestamps
    /// with `now`.
    #[must_use]
    pub fn from_new(id: ProposalUuid, proposal: NewProposal, now: Timestamp) -> Self {
        let ProposalFields {
            title,
            principal_investigator,
            funding_agency,
            requested_amount,
            submission_deadline,
            status,
            description,
        } = proposal.into_fields();

        Self {
            id,
            title,
            principal_investigator,
            funding_agency,
            requested_amount,
            submission_deadline,
            status,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field, keeping the identity and creation time.
    #[must_use]
    pub fn with_changes(self, changes: ProposalChanges, now: Timestamp) -> Self {
        let ProposalFields {
            title,
            principal_investigator,
            funding_agency,
            requested_amount,
            submission_deadline,
            status,
            description,
        } = changes.into_fields();

        Self {
            title,
            principal_investigator,
            funding_agency,
            requested_amount,
            submission_deadline,
            status,
            description,
            updated_at: now,
            ..self
        }
    }

    /// Whether the deadline passed before `now` while the proposal is still
    /// awaiting a decision.
    ///
    /// The deadline is taken to begin at midnight UTC on its date.
    #[must_use]
    pub fn is_overdue_at(&self, now: Timestamp) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        let today = now.to_zoned(TimeZone::UTC).datetime();

        self.submission_deadline.to_datetime(Time::midnight()) < today
    }

    /// [`Self::is_overdue_at`] evaluated against the current time.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Timestamp::now())
    }
}
