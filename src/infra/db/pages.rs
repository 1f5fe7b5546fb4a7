use async_trait::async_trait;

use crate::application::repos::{ContentScope, PagesRepo, RepoError};
use crate::domain::entities::PageRecord;
use crate::domain::types::ContentStatus;

use super::{PostgresRepositories, map_sqlx_error};

pub(super) const PAGE_COLUMNS: &str = "id, slug, title, content, status, seo_title, \
    seo_description, seo_image_path, published_at, created_at, updated_at";

#[async_trait]
impl PagesRepo for PostgresRepositories {
    async fn list_pages(&self, scope: ContentScope) -> Result<Vec<PageRecord>, RepoError> {
        let sql = match scope {
            ContentScope::Published => {
                format!("SELECT {PAGE_COLUMNS} FROM pages WHERE status = $1 ORDER BY title, id")
            }
            ContentScope::All => format!("SELECT {PAGE_COLUMNS} FROM pages ORDER BY title, id"),
        };
        let mut query = sqlx::query_as::<_, PageRecord>(&sql);
        if scope == ContentScope::Published {
            query = query.bind(ContentStatus::Published);
        }
        query.fetch_all(self.pool()).await.map_err(map_sqlx_error)
    }

    async fn find_page_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, RepoError> {
        sqlx::query_as::<_, PageRecord>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
