//! Proposal status

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Where a proposal stands in the funding process.
///
/// Any status may be set to any other; there is no enforced transition graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalStatus {
    /// Still being written
    #[default]
    Draft,

    /// Sent to the funding agency
    Submitted,

    /// Being assessed by the agency
    UnderReview,

    /// Funded
    Approved,

    /// Declined
    Rejected,
}

impl ProposalStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Submitted,
        Self::UnderReview,
        Self::Approved,
        Self::Rejected,
    ];

    /// The wire form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under-review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// A funding decision has been made.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Still awaiting a decision.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        !self.is_terminal()
    }

    /// Human readable label, e.g. `Under Review`.
    #[must_use]
    pub fn label(self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();

                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Display for ProposalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ValidationError::InvalidStatus(value.to_owned()))
    }
}
