//! Usages Repository

use grantboard::usages::{Usage, UsageUuid};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

const LIST_USAGES_SQL: &str = include_str!("sql/list_usages.sql");
const CREATE_USAGE_SQL: &str = include_str!("sql/create_usage.sql");
const DELETE_USAGE_SQL: &str = include_str!("sql/delete_usage.sql");
const CLEAR_USAGES_SQL: &str = include_str!("sql/clear_usages.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsagesRepository;

impl PgUsagesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_usages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Usage>, sqlx::Error> {
        let records = query_as::<Postgres, UsageRecord>(LIST_USAGES_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(records.into_iter().map(|record| record.0).collect())
    }

    pub(crate) async fn create_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        usage: &Usage,
        created_at: Timestamp,
    ) -> Result<Usage, sqlx::Error> {
        let record = query_as::<Postgres, UsageRecord>(CREATE_USAGE_SQL)
            .bind(usage.id.into_uuid())
            .bind(&usage.tool_name)
            .bind(&usage.user_name)
            .bind(&usage.purpose)
            .bind(&usage.start_at_iso)
            .bind(i64::from(usage.duration_minutes))
            .bind(&usage.status)
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await?;

        Ok(record.0)
    }

    pub(crate) async fn delete_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        usage: UsageUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USAGE_SQL)
            .bind(usage.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_usages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_USAGES_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

struct UsageRecord(Usage);

impl<'r> FromRow<'r, PgRow> for UsageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let duration_i64: i64 = row.try_get("duration_minutes")?;

        let duration_minutes =
            u32::try_from(duration_i64).map_err(|e| sqlx::Error::ColumnDecode {
                index: "duration_minutes".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self(Usage {
            id: UsageUuid::from_uuid(row.try_get("uuid")?),
            tool_name: row.try_get("tool_name")?,
            user_name: row.try_get("user_name")?,
            purpose: row.try_get("purpose")?,
            start_at_iso: row.try_get("start_at_iso")?,
            duration_minutes,
            status: row.try_get("status")?,
        }))
    }
}
