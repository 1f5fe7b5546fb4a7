use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{CreateFatwaQuestionParams, FatwasRepo, RepoError};
use crate::domain::entities::{FatwaCategoryRecord, FatwaQuestionRecord, FatwaRecord};
use crate::domain::types::{ContentStatus, FatwaQuestionStatus};

use super::{PostgresRepositories, map_sqlx_error};

const CATEGORY_COLUMNS: &str =
    "id, name, slug, description, is_active, sort_order, created_at, updated_at";

const FATWA_COLUMNS: &str = "id, slug, title, category_id, question_text, answer_text, status, \
    is_featured, published_at, created_at, updated_at";

const QUESTION_COLUMNS: &str =
    "id, name, email, category_id, question_text, status, created_at, updated_at";

#[async_trait]
impl FatwasRepo for PostgresRepositories {
    async fn list_fatwa_categories(&self) -> Result<Vec<FatwaCategoryRecord>, RepoError> {
        sqlx::query_as::<_, FatwaCategoryRecord>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM fatwa_categories WHERE is_active \
             ORDER BY sort_order, name, id"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_fatwa_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<FatwaCategoryRecord>, RepoError> {
        sqlx::query_as::<_, FatwaCategoryRecord>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM fatwa_categories WHERE slug = $1 AND is_active"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_fatwas(&self, category_id: Option<Uuid>) -> Result<Vec<FatwaRecord>, RepoError> {
        sqlx::query_as::<_, FatwaRecord>(&format!(
            "SELECT {FATWA_COLUMNS} FROM fatwas \
             WHERE status = $1 AND ($2::UUID IS NULL OR category_id = $2) \
             ORDER BY is_featured DESC, published_at DESC NULLS LAST, id"
        ))
        .bind(ContentStatus::Published)
        .bind(category_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_fatwa_by_slug(&self, slug: &str) -> Result<Option<FatwaRecord>, RepoError> {
        sqlx::query_as::<_, FatwaRecord>(&format!(
            "SELECT {FATWA_COLUMNS} FROM fatwas WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn create_fatwa_question(
        &self,
        params: CreateFatwaQuestionParams,
    ) -> Result<FatwaQuestionRecord, RepoError> {
        sqlx::query_as::<_, FatwaQuestionRecord>(&format!(
            "INSERT INTO fatwa_questions (id, name, email, category_id, question_text, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {QUESTION_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(params.name)
        .bind(params.email)
        .bind(params.category_id)
        .bind(params.question_text)
        .bind(FatwaQuestionStatus::Pending)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
