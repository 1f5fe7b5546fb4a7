use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{EventParams, EventsRepo, EventsWriteRepo, RepoError};
use crate::domain::entities::EventRecord;

use super::{PostgresRepositories, map_sqlx_error};

const EVENT_COLUMNS: &str =
    "id, title, location, summary, starts_at, ends_at, is_public, created_at, updated_at";

#[async_trait]
impl EventsRepo for PostgresRepositories {
    async fn list_events(&self, public_only: bool) -> Result<Vec<EventRecord>, RepoError> {
        sqlx::query_as::<_, EventRecord>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE ($1 = FALSE OR is_public) \
             ORDER BY starts_at, id"
        ))
        .bind(public_only)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<EventRecord>, RepoError> {
        sqlx::query_as::<_, EventRecord>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl EventsWriteRepo for PostgresRepositories {
    async fn create_event(&self, params: EventParams) -> Result<EventRecord, RepoError> {
        sqlx::query_as::<_, EventRecord>(&format!(
            "INSERT INTO events (id, title, location, summary, starts_at, ends_at, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(params.title)
        .bind(params.location)
        .bind(params.summary)
        .bind(params.starts_at)
        .bind(params.ends_at)
        .bind(params.is_public)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_event(&self, id: Uuid, params: EventParams) -> Result<EventRecord, RepoError> {
        sqlx::query_as::<_, EventRecord>(&format!(
            "UPDATE events SET title = $2, location = $3, summary = $4, starts_at = $5, \
             ends_at = $6, is_public = $7, updated_at = now() \
             WHERE id = $1 \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(params.title)
        .bind(params.location)
        .bind(params.summary)
        .bind(params.starts_at)
        .bind(params.ends_at)
        .bind(params.is_public)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)
    }

    async fn delete_event(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
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
