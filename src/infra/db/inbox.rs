use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::pagination::{PageRequest, Paginated};
use crate::application::repos::{CreateInboxMessageParams, InboxQueryFilter, InboxRepo, RepoError};
use crate::domain::entities::InboxMessageRecord;
use crate::domain::types::InboxStatus;

use super::util::{contains_pattern, convert_count, to_i64};
use super::{PostgresRepositories, map_sqlx_error};

const MESSAGE_COLUMNS: &str =
    "id, name, email, phone, subject, message, status, replied_at, created_at, updated_at";

fn apply_filter<'q>(qb: &mut QueryBuilder<'q, Postgres>, filter: &'q InboxQueryFilter) {
    qb.push(" WHERE TRUE");
    if let Some(status) = filter.status {
        qb.push(" AND status = ");
        qb.push_bind(status);
    }
    if let Some(search) = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|search| !search.is_empty())
    {
        let pattern = contains_pattern(search);
        qb.push(" AND (name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR email ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR subject ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR message ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

#[async_trait]
impl InboxRepo for PostgresRepositories {
    async fn list_messages(
        &self,
        filter: &InboxQueryFilter,
        page: PageRequest,
    ) -> Result<Paginated<InboxMessageRecord>, RepoError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM inbox_messages");
        apply_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {MESSAGE_COLUMNS} FROM inbox_messages"));
        apply_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, id LIMIT ");
        qb.push_bind(to_i64(page.limit()));
        qb.push(" OFFSET ");
        qb.push_bind(to_i64(page.offset()));

        let rows = qb
            .build_query_as::<InboxMessageRecord>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(page.envelope(rows, convert_count(total)?))
    }

    async fn count_by_status(&self) -> Result<Vec<(InboxStatus, u64)>, RepoError> {
        let rows: Vec<(InboxStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM inbox_messages GROUP BY status")
                .fetch_all(self.pool())
                .await
                .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|(status, count)| Ok((status, convert_count(count)?)))
            .collect()
    }

    async fn find_message(&self, id: Uuid) -> Result<Option<InboxMessageRecord>, RepoError> {
        sqlx::query_as::<_, InboxMessageRecord>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM inbox_messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn create_message(
        &self,
        params: CreateInboxMessageParams,
    ) -> Result<InboxMessageRecord, RepoError> {
        sqlx::query_as::<_, InboxMessageRecord>(&format!(
            "INSERT INTO inbox_messages (id, name, email, phone, subject, message, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(params.name)
        .bind(params.email)
        .bind(params.phone)
        .bind(params.subject)
        .bind(params.message)
        .bind(InboxStatus::New)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_message_status(
        &self,
        id: Uuid,
        status: InboxStatus,
        replied_at: Option<OffsetDateTime>,
    ) -> Result<InboxMessageRecord, RepoError> {
        sqlx::query_as::<_, InboxMessageRecord>(&format!(
            "UPDATE inbox_messages \
             SET status = $2, replied_at = COALESCE($3, replied_at), updated_at = now() \
             WHERE id = $1 \
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .bind(replied_at)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)
    }

    async fn delete_message(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM inbox_messages WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
