//! Proposal book
//!
//! An immutable snapshot of the proposal list. Every transition consumes a
//! snapshot and returns the next one; the book keeps the order records were
//! added in, newest first.

use jiff::Timestamp;

use crate::proposals::{NewProposal, Proposal, ProposalChanges, ProposalUuid};

/// Proposal list snapshot, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalBook {
    proposals: Vec<Proposal>,
}

impl ProposalBook {
    /// An empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            proposals: Vec::new(),
        }
    }

    /// Wrap a list as it was loaded, without reordering it.
    #[must_use]
    pub const fn from_vec(proposals: Vec<Proposal>) -> Self {
        Self { proposals }
    }

    /// The records in book order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Proposal> {
        self.proposals
    }

    /// Borrow the records in book order.
    #[must_use]
    pub fn as_slice(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Iterate over the records in book order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    /// Whether the book holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// The record with `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProposalUuid) -> Option<&Proposal> {
        self.proposals.iter().find(|proposal| proposal.id == id)
    }

    /// Prepend a record.
    #[must_use]
    pub fn insert(mut self, proposal: Proposal) -> Self {
        self.proposals.insert(0, proposal);
        self
    }

    /// Create a record from validated fields and prepend it.
    #[must_use]
    pub fn create(self, proposal: NewProposal, id: ProposalUuid, now: Timestamp) -> (Self, Proposal) {
        let created = Proposal::from_new(id, proposal, now);

        (self.insert(created.clone()), created)
    }

    /// Swap in `proposal` for the record sharing its id. Absent ids leave the
    /// book unchanged.
    #[must_use]
    pub fn replace(mut self, proposal: Proposal) -> Self {
        if let Some(slot) = self.proposals.iter_mut().find(|p| p.id == proposal.id) {
            *slot = proposal;
        }

        self
    }

    /// Apply replacement fields to the record with `id`, returning `None`
    /// when there is no such record.
    #[must_use]
    pub fn update(
        self,
        id: ProposalUuid,
        changes: ProposalChanges,
        now: Timestamp,
    ) -> Option<(Self, Proposal)> {
        let updated = self.get(id)?.clone().with_changes(changes, now);

        Some((self.replace(updated.clone()), updated))
    }

    /// Drop the record with `id`, if present.
    #[must_use]
    pub fn remove(mut self, id: ProposalUuid) -> Self {
        self.proposals.retain(|proposal| proposal.id != id);
        self
    }

    /// Drop every record.
    #[must_use]
    pub fn clear(self) -> Self {
        Self::new()
    }
}

impl From<Vec<Proposal>> for ProposalBook {
    fn from(proposals: Vec<Proposal>) -> Self {
        Self::from_vec(proposals)
    }
}

impl<'a> IntoIterator for &'a ProposalBook {
    type Item = &'a Proposal;
    type IntoIter = std::slice::Iter<'a, Proposal>;

    fn into_iter(self) -> Self::IntoIter {
        self.proposals.iter()
    }
}
