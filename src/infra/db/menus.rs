use async_trait::async_trait;

use crate::application::repos::{MenusRepo, RepoError};
use crate::domain::entities::MenuLinkRecord;

use super::{PostgresRepositories, map_sqlx_error};

#[async_trait]
impl MenusRepo for PostgresRepositories {
    async fn list_visible_menu_links(&self) -> Result<Vec<MenuLinkRecord>, RepoError> {
        sqlx::query_as::<_, MenuLinkRecord>(
            "SELECT id, parent_id, label, url, is_visible, sort_order, created_at, updated_at \
             FROM menu_links WHERE is_visible \
             ORDER BY sort_order, label, id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
