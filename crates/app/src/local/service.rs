//! Proposals service over local storage.

use async_trait::async_trait;
use grantboard::{
    book::ProposalBook,
    proposals::{Proposal, ProposalInput, ProposalUuid},
    view::{ProposalFilter, filter_proposals},
};
use jiff::Timestamp;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    domain::proposals::{ProposalsService, ProposalsServiceError},
    local::storage::{LocalStorage, LocalStorageError, PROPOSALS_KEY},
};

/// Proposals kept in a [`LocalStorage`] directory.
///
/// The list is read once when the service is opened. Each mutation computes
/// the next [`ProposalBook`], writes the whole list back, and only then makes
/// it current.
#[derive(Debug)]
pub struct LocalProposalsService {
    storage: LocalStorage,
    book: RwLock<ProposalBook>,
}

impl LocalProposalsService {
    pub async fn open(storage: LocalStorage) -> Result<Self, LocalStorageError> {
        let proposals = storage
            .get::<Vec<Proposal>>(PROPOSALS_KEY)
            .await?
            .unwrap_or_default();

        Ok(Self {
            storage,
            book: RwLock::new(ProposalBook::from_vec(proposals)),
        })
    }

    /// A copy of the current snapshot.
    pub async fn snapshot(&self) -> ProposalBook {
        self.book.read().await.clone()
    }

    async fn commit(
        &self,
        book: &mut ProposalBook,
        next: ProposalBook,
    ) -> Result<(), ProposalsServiceError> {
        self.storage.set(PROPOSALS_KEY, next.as_slice()).await?;

        *book = next;

        Ok(())
    }
}

#[async_trait]
impl ProposalsService for LocalProposalsService {
    async fn list_proposals(&self) -> Result<Vec<Proposal>, ProposalsServiceError> {
        let book = self.book.read().await;

        Ok(filter_proposals(&*book, &ProposalFilter::default())
            .into_iter()
            .cloned()
            .collect())
    }

    async fn create_proposal(
        &self,
        input: ProposalInput,
    ) -> Result<Proposal, ProposalsServiceError> {
        let new = input.validate_new()?;

        let mut book = self.book.write().await;

        let (next, created) = book
            .clone()
            .create(new, ProposalUuid::new(), Timestamp::now());

        self.commit(&mut book, next).await?;

        info!(proposal_uuid = %created.id, "created local proposal");

        Ok(created)
    }

    async fn update_proposal(
        &self,
        proposal: ProposalUuid,
        input: ProposalInput,
    ) -> Result<Proposal, ProposalsServiceError> {
        let mut book = self.book.write().await;

        if book.get(proposal).is_none() {
            return Err(ProposalsServiceError::NotFound);
        }

        let changes = input.coerce_update()?;

        let (next, updated) = book
            .clone()
            .update(proposal, changes, Timestamp::now())
            .ok_or(ProposalsServiceError::NotFound)?;

        self.commit(&mut book, next).await?;

        info!(proposal_uuid = %updated.id, status = %updated.status, "updated local proposal");

        Ok(updated)
    }

    async fn delete_proposal(&self, proposal: ProposalUuid) -> Result<(), ProposalsServiceError> {
        let mut book = self.book.write().await;

        let next = book.clone().remove(proposal);

        self.commit(&mut book, next).await?;

        info!(proposal_uuid = %proposal, "deleted local proposal");

        Ok(())
    }

    async fn clear_proposals(&self) -> Result<u64, ProposalsServiceError> {
        let mut book = self.book.write().await;

        let removed = u64::try_from(book.len()).unwrap_or(u64::MAX);

        self.commit(&mut book, ProposalBook::new()).await?;

        info!(removed, "cleared local proposals");

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use grantboard::{proposals::ProposalStatus, validation::ValidationError};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::helpers::proposal_input;

    use super::*;

    async fn open(dir: &tempfile::TempDir) -> Result<LocalProposalsService, LocalStorageError> {
        LocalProposalsService::open(LocalStorage::open(dir.path()).await?).await
    }

    #[tokio::test]
    async fn created_proposals_survive_reopening() -> TestResult {
        let dir = tempfile::tempdir()?;

        let created = open(&dir).await?.create_proposal(proposal_input()).await?;

        let reopened = open(&dir).await?.list_proposals().await?;

        assert_eq!(reopened, vec![created]);

        Ok(())
    }

    #[tokio::test]
    async fn list_is_newest_first() -> TestResult {
        let dir = tempfile::tempdir()?;
        let service = open(&dir).await?;

        let first = service.create_proposal(proposal_input()).await?;
        let second = service.create_proposal(proposal_input()).await?;

        let ids: Vec<_> = service
            .list_proposals()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![second.id, first.id]);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_proposal_is_not_found() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = open(&dir)
            .await?
            .update_proposal(ProposalUuid::new(), ProposalInput::default())
            .await;

        assert!(
            matches!(result, Err(ProposalsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_persists_status_change() -> TestResult {
        let dir = tempfile::tempdir()?;
        let service = open(&dir).await?;

        let created = service.create_proposal(proposal_input()).await?;

        service
            .update_proposal(
                created.id,
                ProposalInput {
                    status: Some("approved".to_string()),
                    ..proposal_input()
                },
            )
            .await?;

        let reopened = open(&dir).await?.snapshot().await;

        assert_eq!(
            reopened.get(created.id).map(|p| p.status),
            Some(ProposalStatus::Approved)
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_leaves_storage_untouched() -> TestResult {
        let dir = tempfile::tempdir()?;
        let service = open(&dir).await?;

        let result = service
            .create_proposal(ProposalInput {
                requested_amount: Some(Decimal::ZERO),
                ..proposal_input()
            })
            .await;

        assert!(
            matches!(
                result,
                Err(ProposalsServiceError::Validation(
                    ValidationError::NonPositiveAmount
                ))
            ),
            "expected NonPositiveAmount, got {result:?}"
        );
        assert!(!dir.path().join("proposals.json").exists());

        Ok(())
    }

    #[tokio::test]
    async fn delete_and_clear_are_idempotent() -> TestResult {
        let dir = tempfile::tempdir()?;
        let service = open(&dir).await?;

        let created = service.create_proposal(proposal_input()).await?;
        service.create_proposal(proposal_input()).await?;

        service.delete_proposal(created.id).await?;
        service.delete_proposal(created.id).await?;

        assert_eq!(service.clear_proposals().await?, 1);
        assert_eq!(service.clear_proposals().await?, 0);
        assert!(open(&dir).await?.list_proposals().await?.is_empty());

        Ok(())
    }
}
