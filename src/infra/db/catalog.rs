use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::application::repos::{CatalogRepo, CourseQueryFilter, RepoError};
use crate::domain::entities::{
    BookRecord, CourseRecord, DonationRecord, GraduateRecord, ScholarRecord,
};
use crate::domain::types::ContentStatus;

use super::{PostgresRepositories, map_sqlx_error};

const COURSE_COLUMNS: &str = "id, title, category, description, duration, level, \
    instructor_name, cover_image_path, enrollment_cta, is_featured, sort_order, status, \
    created_at, updated_at";

const BOOK_COLUMNS: &str = "id, title, author, category, description, cover_image_path, \
    file_path, file_size, download_count, is_featured, sort_order, status, created_at, updated_at";

const SCHOLAR_COLUMNS: &str = "id, name, title, bio, photo_path, specializations, \
    contact_email, is_featured, sort_order, status, created_at, updated_at";

const GRADUATE_COLUMNS: &str = "id, name, graduation_year, program, photo_path, bio, \
    is_featured, sort_order, status, created_at, updated_at";

const DONATION_COLUMNS: &str = "id, title, description, target_amount_minor, \
    current_amount_minor, bank_details, payment_links, is_active, sort_order, created_at, \
    updated_at";

#[async_trait]
impl CatalogRepo for PostgresRepositories {
    async fn list_courses(
        &self,
        filter: &CourseQueryFilter,
    ) -> Result<Vec<CourseRecord>, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE status = "
        ));
        qb.push_bind(ContentStatus::Published);
        if let Some(category) = filter.category.as_ref() {
            qb.push(" AND category = ");
            qb.push_bind(category);
        }
        if let Some(level) = filter.level.as_ref() {
            qb.push(" AND level = ");
            qb.push_bind(level);
        }
        qb.push(" ORDER BY is_featured DESC, sort_order, title, id");

        qb.build_query_as::<CourseRecord>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<CourseRecord>, RepoError> {
        sqlx::query_as::<_, CourseRecord>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_books(&self, category: Option<&str>) -> Result<Vec<BookRecord>, RepoError> {
        sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM library_books \
             WHERE status = $1 AND ($2::TEXT IS NULL OR category = $2) \
             ORDER BY sort_order, created_at DESC, id"
        ))
        .bind(ContentStatus::Published)
        .bind(category)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_book(&self, id: Uuid) -> Result<Option<BookRecord>, RepoError> {
        sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM library_books WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_scholars(&self) -> Result<Vec<ScholarRecord>, RepoError> {
        sqlx::query_as::<_, ScholarRecord>(&format!(
            "SELECT {SCHOLAR_COLUMNS} FROM scholars WHERE status = $1 \
             ORDER BY is_featured DESC, sort_order, name, id"
        ))
        .bind(ContentStatus::Published)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_graduates(&self, year: Option<i32>) -> Result<Vec<GraduateRecord>, RepoError> {
        sqlx::query_as::<_, GraduateRecord>(&format!(
            "SELECT {GRADUATE_COLUMNS} FROM graduates \
             WHERE status = $1 AND ($2::INTEGER IS NULL OR graduation_year = $2) \
             ORDER BY graduation_year DESC NULLS LAST, sort_order, name, id"
        ))
        .bind(ContentStatus::Published)
        .bind(year)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_donations(&self) -> Result<Vec<DonationRecord>, RepoError> {
        sqlx::query_as::<_, DonationRecord>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE is_active ORDER BY sort_order, id"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
