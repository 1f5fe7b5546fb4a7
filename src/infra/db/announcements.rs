use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::pagination::{PageRequest, Paginated};
use crate::application::repos::{AnnouncementsRepo, RepoError};
use crate::domain::entities::AnnouncementRecord;
use crate::domain::types::ContentStatus;

use super::util::{convert_count, to_i64};
use super::{PostgresRepositories, map_sqlx_error};

const ANNOUNCEMENT_COLUMNS: &str =
    "id, title, body, status, is_pinned, published_at, expires_at, created_at, updated_at";

const VISIBLE: &str = "status = $1 \
    AND (published_at IS NULL OR published_at <= $2) \
    AND (expires_at IS NULL OR expires_at >= $2)";

#[async_trait]
impl AnnouncementsRepo for PostgresRepositories {
    async fn list_visible_announcements(
        &self,
        now: OffsetDateTime,
        page: PageRequest,
    ) -> Result<Paginated<AnnouncementRecord>, RepoError> {
        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM announcements WHERE {VISIBLE}"))
                .bind(ContentStatus::Published)
                .bind(now)
                .fetch_one(self.pool())
                .await
                .map_err(map_sqlx_error)?;

        let rows = sqlx::query_as::<_, AnnouncementRecord>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE {VISIBLE} \
             ORDER BY is_pinned DESC, COALESCE(published_at, created_at) DESC, id \
             LIMIT $3 OFFSET $4"
        ))
        .bind(ContentStatus::Published)
        .bind(now)
        .bind(to_i64(page.limit()))
        .bind(to_i64(page.offset()))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(page.envelope(rows, convert_count(total)?))
    }

    async fn find_announcement(&self, id: Uuid) -> Result<Option<AnnouncementRecord>, RepoError> {
        sqlx::query_as::<_, AnnouncementRecord>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
