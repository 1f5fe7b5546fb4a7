use async_trait::async_trait;
use uuid::Uuid;

use crate::application::pagination::{PageRequest, Paginated};
use crate::application::repos::{MediaRepo, RepoError};
use crate::domain::entities::{MediaCategoryRecord, MediaRecord};

use super::util::{convert_count, to_i64};
use super::{PostgresRepositories, map_sqlx_error};

const CATEGORY_COLUMNS: &str =
    "id, name, slug, description, cover_image_path, is_active, sort_order, created_at, updated_at";

const MEDIA_COLUMNS: &str =
    "id, category_id, title, description, media_type, file_path, created_at, updated_at";

#[async_trait]
impl MediaRepo for PostgresRepositories {
    async fn list_media_categories(&self) -> Result<Vec<MediaCategoryRecord>, RepoError> {
        sqlx::query_as::<_, MediaCategoryRecord>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM media_categories WHERE is_active \
             ORDER BY sort_order, name, id"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_media_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<MediaCategoryRecord>, RepoError> {
        sqlx::query_as::<_, MediaCategoryRecord>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM media_categories WHERE slug = $1 AND is_active"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_media(
        &self,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Paginated<MediaRecord>, RepoError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM media WHERE ($1::UUID IS NULL OR category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let rows = sqlx::query_as::<_, MediaRecord>(&format!(
            "SELECT {MEDIA_COLUMNS} FROM media WHERE ($1::UUID IS NULL OR category_id = $1) \
             ORDER BY created_at DESC, id LIMIT $2 OFFSET $3"
        ))
        .bind(category_id)
        .bind(to_i64(page.limit()))
        .bind(to_i64(page.offset()))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(page.envelope(rows, convert_count(total)?))
    }
}
