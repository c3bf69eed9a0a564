//! Usages service.

use async_trait::async_trait;
use grantboard::usages::{Usage, UsageInput, UsageUuid};
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::usages::{errors::UsagesServiceError, repository::PgUsagesRepository},
};

#[derive(Debug, Clone)]
pub struct PgUsagesService {
    db: Db,
    repository: PgUsagesRepository,
}

impl PgUsagesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsagesRepository::new(),
        }
    }
}

#[async_trait]
impl UsagesService for PgUsagesService {
    async fn list_usages(&self) -> Result<Vec<Usage>, UsagesServiceError> {
        let mut tx = self.db.begin().await?;

        let usages = self.repository.list_usages(&mut tx).await?;

        tx.commit().await?;

        Ok(usages)
    }

    async fn create_usage(&self, input: UsageInput) -> Result<Usage, UsagesServiceError> {
        let usage = Usage::from_new(UsageUuid::new(), input.validate_new()?);

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_usage(&mut tx, &usage, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!(usage_uuid = %created.id, tool_name = %created.tool_name, "recorded usage");

        Ok(created)
    }

    async fn delete_usage(&self, usage: UsageUuid) -> Result<(), UsagesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_usage(&mut tx, usage).await?;

        tx.commit().await?;

        info!(usage_uuid = %usage, rows_affected, "deleted usage");

        Ok(())
    }

    async fn clear_usages(&self) -> Result<u64, UsagesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.clear_usages(&mut tx).await?;

        tx.commit().await?;

        info!(rows_affected, "cleared usages");

        Ok(rows_affected)
    }
}

#[automock]
#[async_trait]
pub trait UsagesService: Send + Sync {
    /// Retrieves all usages, newest first.
    async fn list_usages(&self) -> Result<Vec<Usage>, UsagesServiceError>;

    /// Validates and records a new usage.
    async fn create_usage(&self, input: UsageInput) -> Result<Usage, UsagesServiceError>;

    /// Deletes a usage. Deleting an unknown id is not an error.
    async fn delete_usage(&self, usage: UsageUuid) -> Result<(), UsagesServiceError>;

    /// Deletes every usage, returning how many were removed.
    async fn clear_usages(&self) -> Result<u64, UsagesServiceError>;
}
