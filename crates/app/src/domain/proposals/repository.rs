//! Proposals Repository

use grantboard::proposals::{Proposal, ProposalStatus, ProposalUuid};
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

const LIST_PROPOSALS_SQL: &str = include_str!("sql/list_proposals.sql");
const LOCK_PROPOSAL_SQL: &str = include_str!("sql/lock_proposal.sql");
const CREATE_PROPOSAL_SQL: &str = include_str!("sql/create_proposal.sql");
const UPDATE_PROPOSAL_SQL: &str = include_str!("sql/update_proposal.sql");
const DELETE_PROPOSAL_SQL: &str = include_str!("sql/delete_proposal.sql");
const CLEAR_PROPOSALS_SQL: &str = include_str!("sql/clear_proposals.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProposalsRepository;

impl PgProposalsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_proposals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Proposal>, sqlx::Error> {
        let records = query_as::<Postgres, ProposalRecord>(LIST_PROPOSALS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(records.into_iter().map(|record| record.0).collect())
    }

    /// Fetch a proposal and hold its row lock until the transaction ends.
    pub(crate) async fn lock_proposal(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        proposal: ProposalUuid,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let record = query_as::<Postgres, ProposalRecord>(LOCK_PROPOSAL_SQL)
            .bind(proposal.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(record.map(|record| record.0))
    }

    pub(crate) async fn create_proposal(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        proposal: &Proposal,
    ) -> Result<Proposal, sqlx::Error> {
        let record = query_as::<Postgres, ProposalRecord>(CREATE_PROPOSAL_SQL)
            .bind(proposal.id.into_uuid())
            .bind(&proposal.title)
            .bind(&proposal.principal_investigator)
            .bind(&proposal.funding_agency)
            .bind(proposal.requested_amount)
            .bind(SqlxDate::from(proposal.submission_deadline))
            .bind(proposal.status.as_str())
            .bind(&proposal.description)
            .bind(SqlxTimestamp::from(proposal.created_at))
            .bind(SqlxTimestamp::from(proposal.updated_at))
            .fetch_one(&mut **tx)
            .await?;

        Ok(record.0)
    }

    pub(crate) async fn update_proposal(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        proposal: &Proposal,
    ) -> Result<Proposal, sqlx::Error> {
        let record = query_as::<Postgres, ProposalRecord>(UPDATE_PROPOSAL_SQL)
            .bind(proposal.id.into_uuid())
            .bind(&proposal.title)
            .bind(&proposal.principal_investigator)
            .bind(&proposal.funding_agency)
            .bind(proposal.requested_amount)
            .bind(SqlxDate::from(proposal.submission_deadline))
            .bind(proposal.status.as_str())
            .bind(&proposal.description)
            .bind(SqlxTimestamp::from(proposal.updated_at))
            .fetch_one(&mut **tx)
            .await?;

        Ok(record.0)
    }

    pub(crate) async fn delete_proposal(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        proposal: ProposalUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROPOSAL_SQL)
            .bind(proposal.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_proposals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_PROPOSALS_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Proposal row wrapper; the record type itself lives in the core crate.
struct ProposalRecord(Proposal);

impl<'r> FromRow<'r, PgRow> for ProposalRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<ProposalStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self(Proposal {
            id: ProposalUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            principal_investigator: row.try_get("principal_investigator")?,
            funding_agency: row.try_get("funding_agency")?,
            requested_amount: row.try_get::<Decimal, _>("requested_amount")?,
            submission_deadline: row.try_get::<SqlxDate, _>("submission_deadline")?.to_jiff(),
            status,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        }))
    }
}
