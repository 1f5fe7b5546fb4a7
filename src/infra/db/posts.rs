use async_trait::async_trait;
use uuid::Uuid;

use crate::application::pagination::{PageRequest, Paginated};
use crate::application::repos::{ContentScope, PostsRepo, RepoError};
use crate::domain::entities::PostRecord;
use crate::domain::types::ContentStatus;

use super::util::{convert_count, to_i64};
use super::{PostgresRepositories, map_sqlx_error};

pub(super) const POST_COLUMNS: &str = "id, slug, title, excerpt, content, status, seo_title, \
    seo_description, seo_image_path, published_at, created_at, updated_at";

const POST_ORDER: &str = "ORDER BY published_at DESC NULLS LAST, created_at DESC, id";

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_posts(&self, scope: ContentScope) -> Result<Vec<PostRecord>, RepoError> {
        let sql = match scope {
            ContentScope::Published => {
                format!("SELECT {POST_COLUMNS} FROM posts WHERE status = $1 {POST_ORDER}")
            }
            ContentScope::All => format!("SELECT {POST_COLUMNS} FROM posts {POST_ORDER}"),
        };
        let mut query = sqlx::query_as::<_, PostRecord>(&sql);
        if scope == ContentScope::Published {
            query = query.bind(ContentStatus::Published);
        }
        query.fetch_all(self.pool()).await.map_err(map_sqlx_error)
    }

    async fn list_published_posts(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<PostRecord>, RepoError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE status = $1")
            .bind(ContentStatus::Published)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        let rows = sqlx::query_as::<_, PostRecord>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE status = $1 {POST_ORDER} LIMIT $2 OFFSET $3"
        ))
        .bind(ContentStatus::Published)
        .bind(to_i64(page.limit()))
        .bind(to_i64(page.offset()))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(page.envelope(rows, convert_count(total)?))
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        sqlx::query_as::<_, PostRecord>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        sqlx::query_as::<_, PostRecord>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
