//! Proposal input and validated field sets

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    proposals::{Proposal, ProposalStatus, codec},
    validation::{ValidationError, optional_text, required_text},
};

/// Raw proposal fields as posted by a form or HTTP body.
///
/// Every field is optional so that validation, not deserialization, decides
/// what a missing value means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalInput {
    /// Proposal title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Principal investigator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_investigator: Option<String>,

    /// Funding agency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_agency: Option<String>,

    /// Requested amount in US dollars
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::amount")]
    pub requested_amount: Option<Decimal>,

    /// Submission deadline, `YYYY-MM-DD` or an ISO-8601 instant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_deadline: Option<String>,

    /// Status value, e.g. `under-review`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProposalInput {
    /// Validate the fields of a proposal being created.
    ///
    /// Title, principal investigator, funding agency, deadline and status must
    /// be present and non-blank, and the amount must be greater than zero.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate_new(&self) -> Result<NewProposal, ValidationError> {
        let title = required_text(self.title.as_deref(), "title")?;
        let principal_investigator = required_text(
            self.principal_investigator.as_deref(),
            "principalInvestigator",
        )?;
        let funding_agency = required_text(self.funding_agency.as_deref(), "fundingAgency")?;
        let requested_amount = self
            .requested_amount
            .ok_or(ValidationError::MissingField("requestedAmount"))?;
        let submission_deadline = required_text(
            self.submission_deadline.as_deref(),
            "submissionDeadline",
        )?;
        let status = required_text(self.status.as_deref(), "status")?;

        let fields = ProposalFields {
            title,
            principal_investigator,
            funding_agency,
            requested_amount,
            submission_deadline: codec::deadline::parse(&submission_deadline)?,
            status: status.parse()?,
            description: optional_text(self.description.as_deref()),
        };

        fields.validate()?;

        Ok(NewProposal(fields))
    }

    /// Coerce the fields of a full replacement update.
    ///
    /// Missing text becomes empty, a missing amount becomes zero and a missing
    /// or blank status becomes [`ProposalStatus::Draft`]. The coerced record
    /// must still satisfy the proposal invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the coerced fields are invalid.
    pub fn coerce_update(&self) -> Result<ProposalChanges, ValidationError> {
        let status = optional_text(self.status.as_deref());
        let status = if status.is_empty() {
            ProposalStatus::default()
        } else {
            status.parse()?
        };

        let submission_deadline = required_text(
            self.submission_deadline.as_deref(),
            "submissionDeadline",
        )?;

        let fields = ProposalFields {
            title: optional_text(self.title.as_deref()),
            principal_investigator: optional_text(self.principal_investigator.as_deref()),
            funding_agency: optional_text(self.funding_agency.as_deref()),
            requested_amount: self.requested_amount.unwrap_or(Decimal::ZERO),
            submission_deadline: codec::deadline::parse(&submission_deadline)?,
            status,
            description: optional_text(self.description.as_deref()),
        };

        fields.validate()?;

        Ok(ProposalChanges(fields))
    }

    /// Whether a form holding these fields may be submitted.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        let filled = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

        filled(&self.title)
            && filled(&self.principal_investigator)
            && filled(&self.funding_agency)
            && filled(&self.submission_deadline)
            && filled(&self.status)
            && self.requested_amount.is_some_and(|amount| amount > Decimal::ZERO)
    }
}

impl From<&Proposal> for ProposalInput {
    fn from(proposal: &Proposal) -> Self {
        Self {
            title: Some(proposal.title.clone()),
            principal_investigator: Some(proposal.principal_investigator.clone()),
            funding_agency: Some(proposal.funding_agency.clone()),
            requested_amount: Some(proposal.requested_amount),
            submission_deadline: Some(proposal.submission_deadline.to_string()),
            status: Some(proposal.status.as_str().to_owned()),
            description: Some(proposal.description.clone()),
        }
    }
}

/// The mutable fields of a proposal, trimmed and typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalFields {
    /// Proposal title
    pub title: String,

    /// Principal investigator
    pub principal_investigator: String,

    /// Funding agency
    pub funding_agency: String,

    /// Requested amount in US dollars
    pub requested_amount: Decimal,

    /// Submission deadline
    pub submission_deadline: Date,

    /// Review status
    pub status: ProposalStatus,

    /// Description, possibly empty
    pub description: String,
}

impl ProposalFields {
    /// Check the proposal invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for blank required text and
    /// [`ValidationError::NonPositiveAmount`] when the amount is not positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (value, field) in [
            (&self.title, "title"),
            (&self.principal_investigator, "principalInvestigator"),
            (&self.funding_agency, "fundingAgency"),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        if self.requested_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }

        Ok(())
    }
}

/// Fields of a proposal that passed creation validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProposal(ProposalFields);

impl NewProposal {
    /// The validated fields.
    #[must_use]
    pub const fn fields(&self) -> &ProposalFields {
        &self.0
    }

    /// Unwrap the validated fields.
    #[must_use]
    pub fn into_fields(self) -> ProposalFields {
        self.0
    }
}

/// Replacement fields of a proposal that passed update coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalChanges(ProposalFields);

impl ProposalChanges {
    /// The replacement fields.
    #[must_use]
    pub const fn fields(&self) -> &ProposalFields {
        &self.0
    }

    /// Unwrap the replacement fields.
    #[must_use]
    pub fn into_fields(self) -> ProposalFields {
        self.0
    }
}
