//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::pagination::{PageRequest, Paginated};
use crate::domain::entities::{
    AnnouncementRecord, AuditLogRecord, BookRecord, CourseRecord, DonationRecord, EventRecord,
    FatwaCategoryRecord, FatwaQuestionRecord, FatwaRecord, GraduateRecord, InboxMessageRecord,
    MediaCategoryRecord, MediaRecord, MenuLinkRecord, PageRecord, PostRecord, ScholarRecord,
    SiteSettingsRecord,
};
use crate::domain::seo::SeoMetadata;
use crate::domain::types::InboxStatus;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Which publication states a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentScope {
    Published,
    All,
}

#[derive(Debug, Clone, Default)]
pub struct InboxQueryFilter {
    pub status: Option<InboxStatus>,
    pub search: Option<String>,
}

/// Exact-match filters for the audit trail; `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct AuditQueryFilter {
    pub actor: Option<String>,
    pub action: Option<String>,
    pub entity_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseQueryFilter {
    pub category: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EventParams {
    pub title: String,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub starts_at: OffsetDateTime,
    pub ends_at: Option<OffsetDateTime>,
    pub is_public: bool,
}

#[derive(Debug, Clone)]
pub struct CreateInboxMessageParams {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct CreateFatwaQuestionParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub category_id: Option<Uuid>,
    pub question_text: String,
}

#[async_trait]
pub trait PagesRepo: Send + Sync {
    /// Pages ordered by title.
    async fn list_pages(&self, scope: ContentScope) -> Result<Vec<PageRecord>, RepoError>;

    async fn find_page_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, RepoError>;
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Posts ordered newest `published_at` first, unpublished last.
    async fn list_posts(&self, scope: ContentScope) -> Result<Vec<PostRecord>, RepoError>;

    async fn list_published_posts(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<PostRecord>, RepoError>;

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError>;

    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;
}

#[async_trait]
pub trait AnnouncementsRepo: Send + Sync {
    /// Announcements visible at `now`, pinned first then newest.
    async fn list_visible_announcements(
        &self,
        now: OffsetDateTime,
        page: PageRequest,
    ) -> Result<Paginated<AnnouncementRecord>, RepoError>;

    async fn find_announcement(&self, id: Uuid) -> Result<Option<AnnouncementRecord>, RepoError>;
}

#[async_trait]
pub trait EventsRepo: Send + Sync {
    /// Events ordered by ascending `starts_at`.
    async fn list_events(&self, public_only: bool) -> Result<Vec<EventRecord>, RepoError>;

    async fn find_event(&self, id: Uuid) -> Result<Option<EventRecord>, RepoError>;
}

#[async_trait]
pub trait EventsWriteRepo: Send + Sync {
    async fn create_event(&self, params: EventParams) -> Result<EventRecord, RepoError>;

    /// Fails with [`RepoError::NotFound`] when no event has `id`.
    async fn update_event(&self, id: Uuid, params: EventParams) -> Result<EventRecord, RepoError>;

    /// Fails with [`RepoError::NotFound`] when no event has `id`.
    async fn delete_event(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Writes the SEO metadata columns shared by pages and posts.
#[async_trait]
pub trait ContentSeoWriteRepo: Send + Sync {
    /// Fails with [`RepoError::NotFound`] when no page has `id`.
    async fn update_page_seo(
        &self,
        id: Uuid,
        metadata: &SeoMetadata,
    ) -> Result<PageRecord, RepoError>;

    /// Fails with [`RepoError::NotFound`] when no post has `id`.
    async fn update_post_seo(
        &self,
        id: Uuid,
        metadata: &SeoMetadata,
    ) -> Result<PostRecord, RepoError>;
}

/// Published courses, library books, scholars, graduates and donation campaigns.
#[async_trait]
pub trait CatalogRepo: Send + Sync {
    async fn list_courses(&self, filter: &CourseQueryFilter) -> Result<Vec<CourseRecord>, RepoError>;
    async fn find_course(&self, id: Uuid) -> Result<Option<CourseRecord>, RepoError>;

    /// Ordered by `sort_order`, then newest.
    async fn list_books(&self, category: Option<&str>) -> Result<Vec<BookRecord>, RepoError>;
    async fn find_book(&self, id: Uuid) -> Result<Option<BookRecord>, RepoError>;

    async fn list_scholars(&self) -> Result<Vec<ScholarRecord>, RepoError>;

    /// Newest graduation year first, then `sort_order`.
    async fn list_graduates(&self, year: Option<i32>) -> Result<Vec<GraduateRecord>, RepoError>;

    /// Active campaigns ordered by `sort_order`.
    async fn list_donations(&self) -> Result<Vec<DonationRecord>, RepoError>;
}

#[async_trait]
pub trait MediaRepo: Send + Sync {
    /// Active categories ordered by `sort_order`.
    async fn list_media_categories(&self) -> Result<Vec<MediaCategoryRecord>, RepoError>;

    async fn find_media_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<MediaCategoryRecord>, RepoError>;

    /// Newest first, optionally restricted to one category.
    async fn list_media(
        &self,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Paginated<MediaRecord>, RepoError>;
}

#[async_trait]
pub trait FatwasRepo: Send + Sync {
    async fn list_fatwa_categories(&self) -> Result<Vec<FatwaCategoryRecord>, RepoError>;

    async fn find_fatwa_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<FatwaCategoryRecord>, RepoError>;

    /// Published fatwas, featured first then newest.
    async fn list_fatwas(&self, category_id: Option<Uuid>) -> Result<Vec<FatwaRecord>, RepoError>;

    async fn find_fatwa_by_slug(&self, slug: &str) -> Result<Option<FatwaRecord>, RepoError>;

    async fn create_fatwa_question(
        &self,
        params: CreateFatwaQuestionParams,
    ) -> Result<FatwaQuestionRecord, RepoError>;
}

#[async_trait]
pub trait InboxRepo: Send + Sync {
    /// Newest first.
    async fn list_messages(
        &self,
        filter: &InboxQueryFilter,
        page: PageRequest,
    ) -> Result<Paginated<InboxMessageRecord>, RepoError>;

    async fn count_by_status(&self) -> Result<Vec<(InboxStatus, u64)>, RepoError>;

    async fn find_message(&self, id: Uuid) -> Result<Option<InboxMessageRecord>, RepoError>;

    async fn create_message(
        &self,
        params: CreateInboxMessageParams,
    ) -> Result<InboxMessageRecord, RepoError>;

    /// Set `status`; `replied_at` is written only when provided.
    async fn update_message_status(
        &self,
        id: Uuid,
        status: InboxStatus,
        replied_at: Option<OffsetDateTime>,
    ) -> Result<InboxMessageRecord, RepoError>;

    async fn delete_message(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait MenusRepo: Send + Sync {
    /// Visible links ordered by `sort_order`, then label.
    async fn list_visible_menu_links(&self) -> Result<Vec<MenuLinkRecord>, RepoError>;
}

#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn load_site_settings(&self) -> Result<SiteSettingsRecord, RepoError>;
    async fn upsert_site_settings(&self, settings: SiteSettingsRecord) -> Result<(), RepoError>;
}

#[async_trait]
pub trait AuditRepo: Send + Sync {
    async fn append_log(&self, record: AuditLogRecord) -> Result<(), RepoError>;

    /// Newest entries first.
    async fn list_logs(
        &self,
        filter: &AuditQueryFilter,
        page: PageRequest,
    ) -> Result<Paginated<AuditLogRecord>, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
