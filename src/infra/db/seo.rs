use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{ContentSeoWriteRepo, RepoError};
use crate::domain::entities::{PageRecord, PostRecord};
use crate::domain::seo::SeoMetadata;

use super::pages::PAGE_COLUMNS;
use super::posts::POST_COLUMNS;
use super::{PostgresRepositories, map_sqlx_error};

#[async_trait]
impl ContentSeoWriteRepo for PostgresRepositories {
    async fn update_page_seo(
        &self,
        id: Uuid,
        metadata: &SeoMetadata,
    ) -> Result<PageRecord, RepoError> {
        sqlx::query_as::<_, PageRecord>(&format!(
            "UPDATE pages \
             SET seo_title = $2, seo_description = $3, seo_image_path = $4, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PAGE_COLUMNS}"
        ))
        .bind(id)
        .bind(metadata.seo_title.as_deref())
        .bind(metadata.seo_description.as_deref())
        .bind(metadata.seo_image_path.as_deref())
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)
    }

    async fn update_post_seo(
        &self,
        id: Uuid,
        metadata: &SeoMetadata,
    ) -> Result<PostRecord, RepoError> {
        sqlx::query_as::<_, PostRecord>(&format!(
            "UPDATE posts \
             SET seo_title = $2, seo_description = $3, seo_image_path = $4, updated_at = now() \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .bind(metadata.seo_title.as_deref())
        .bind(metadata.seo_description.as_deref())
        .bind(metadata.seo_image_path.as_deref())
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)
    }
}
