//! Proposals service.

use async_trait::async_trait;
use grantboard::proposals::{Proposal, ProposalInput, ProposalUuid};
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::proposals::{errors::ProposalsServiceError, repository::PgProposalsRepository},
};

#[derive(Debug, Clone)]
pub struct PgProposalsService {
    db: Db,
    repository: PgProposalsRepository,
}

impl PgProposalsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProposalsRepository::new(),
        }
    }
}

#[async_trait]
impl ProposalsService for PgProposalsService {
    async fn list_proposals(&self) -> Result<Vec<Proposal>, ProposalsServiceError> {
        let mut tx = self.db.begin().await?;

        let proposals = self.repository.list_proposals(&mut tx).await?;

        tx.commit().await?;

        Ok(proposals)
    }

    async fn create_proposal(
        &self,
        input: ProposalInput,
    ) -> Result<Proposal, ProposalsServiceError> {
        let proposal = Proposal::from_new(
            ProposalUuid::new(),
            input.validate_new()?,
            Timestamp::now(),
        );

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_proposal(&mut tx, &proposal).await?;

        tx.commit().await?;

        info!(proposal_uuid = %created.id, status = %created.status, "created proposal");

        Ok(created)
    }

    async fn update_proposal(
        &self,
        proposal: ProposalUuid,
        input: ProposalInput,
    ) -> Result<Proposal, ProposalsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .repository
            .lock_proposal(&mut tx, proposal)
            .await?
            .ok_or(ProposalsServiceError::NotFound)?;

        let changed = existing.with_changes(input.coerce_update()?, Timestamp::now());

        let updated = self.repository.update_proposal(&mut tx, &changed).await?;

        tx.commit().await?;

        info!(proposal_uuid = %updated.id, status = %updated.status, "updated proposal");

        Ok(updated)
    }

    async fn delete_proposal(&self, proposal: ProposalUuid) -> Result<(), ProposalsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_proposal(&mut tx, proposal).await?;

        tx.commit().await?;

        info!(proposal_uuid = %proposal, rows_affected, "deleted proposal");

        Ok(())
    }

    async fn clear_proposals(&self) -> Result<u64, ProposalsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.clear_proposals(&mut tx).await?;

        tx.commit().await?;

        info!(rows_affected, "cleared proposals");

        Ok(rows_affected)
    }
}

#[automock]
#[async_trait]
pub trait ProposalsService: Send + Sync {
    /// Retrieves all proposals, newest first.
    async fn list_proposals(&self) -> Result<Vec<Proposal>, ProposalsServiceError>;

    /// Validates and stores a new proposal with a fresh id and timestamps.
    async fn create_proposal(&self, input: ProposalInput)
    -> Result<Proposal, ProposalsServiceError>;

    /// Replaces every mutable field of an existing proposal.
    ///
    /// Unknown ids fail with [`ProposalsServiceError::NotFound`] whatever the
    /// input.
    async fn update_proposal(
        &self,
        proposal: ProposalUuid,
        input: ProposalInput,
    ) -> Result<Proposal, ProposalsServiceError>;

    /// Deletes a proposal. Deleting an unknown id is not an error.
    async fn delete_proposal(&self, proposal: ProposalUuid) -> Result<(), ProposalsServiceError>;

    /// Deletes every proposal, returning how many were removed.
    async fn clear_proposals(&self) -> Result<u64, ProposalsServiceError>;
}
