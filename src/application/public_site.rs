//! Read models and submissions behind the public school website.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use nazim_site_api_types::{ContactSubmission, FatwaQuestionSubmission};

use crate::application::pagination::{
    ANNOUNCEMENTS_PER_PAGE, MEDIA_PER_PAGE, POSTS_PER_PAGE, PageRequest, Paginated,
};
use crate::application::repos::{
    AnnouncementsRepo, CatalogRepo, ContentScope, CourseQueryFilter, CreateFatwaQuestionParams,
    CreateInboxMessageParams, EventsRepo, FatwasRepo, InboxRepo, MediaRepo, MenusRepo, PagesRepo,
    PostsRepo, RepoError, SettingsRepo,
};
use crate::domain::contact::{ContactMessage, FatwaQuestion};
use crate::domain::entities::{
    AnnouncementRecord, BookRecord, CourseRecord, DonationRecord, EventRecord,
    FatwaCategoryRecord, FatwaQuestionRecord, FatwaRecord, GraduateRecord, InboxMessageRecord,
    MediaCategoryRecord, MediaRecord, MenuLinkRecord, PageRecord, PostRecord, ScholarRecord,
    SiteSettingsRecord,
};
use crate::domain::error::DomainError;
use crate::domain::search::retain_matching;
use crate::domain::storage::resolve_public_url;
use crate::domain::types::ContentStatus;

const HOME_PAGE_SLUG: &str = "home";
const SUMMARY_POSTS: usize = 5;
const SUMMARY_EVENTS: usize = 5;

#[derive(Debug, Error)]
pub enum PublicSiteError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// A record together with its public asset URLs.
#[derive(Debug, Clone, Serialize)]
pub struct WithAssets<T> {
    #[serde(flatten)]
    pub record: T,
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl<T> WithAssets<T> {
    fn new(record: T, image: Option<&str>, file: Option<&str>) -> Self {
        Self {
            image_url: resolve_public_url(image),
            file_url: resolve_public_url(file),
            record,
        }
    }
}

trait PublicAssets: Sized {
    fn image_path(&self) -> Option<&str>;

    fn file_path(&self) -> Option<&str> {
        None
    }

    fn with_assets(self) -> WithAssets<Self> {
        let image = self.image_path().map(str::to_string);
        let file = self.file_path().map(str::to_string);
        WithAssets::new(self, image.as_deref(), file.as_deref())
    }
}

impl PublicAssets for CourseRecord {
    fn image_path(&self) -> Option<&str> {
        self.cover_image_path.as_deref()
    }
}

impl PublicAssets for BookRecord {
    fn image_path(&self) -> Option<&str> {
        self.cover_image_path.as_deref()
    }

    fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }
}

impl PublicAssets for ScholarRecord {
    fn image_path(&self) -> Option<&str> {
        self.photo_path.as_deref()
    }
}

impl PublicAssets for GraduateRecord {
    fn image_path(&self) -> Option<&str> {
        self.photo_path.as_deref()
    }
}

impl PublicAssets for MediaCategoryRecord {
    fn image_path(&self) -> Option<&str> {
        self.cover_image_path.as_deref()
    }
}

impl PublicAssets for MediaRecord {
    fn image_path(&self) -> Option<&str> {
        Some(self.file_path.as_str())
    }
}

impl PublicAssets for PostRecord {
    fn image_path(&self) -> Option<&str> {
        self.seo_image_path.as_deref()
    }
}

fn with_assets<T: PublicAssets>(items: Vec<T>) -> Vec<WithAssets<T>> {
    items.into_iter().map(PublicAssets::with_assets).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteSummary {
    pub settings: SiteSettingsRecord,
    pub menu: Vec<MenuLinkRecord>,
    pub home: Option<PageRecord>,
    pub latest_posts: Vec<WithAssets<PostRecord>>,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
    pub category: Option<String>,
    pub level: Option<String>,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct PublicSiteRepos {
    pub pages: Arc<dyn PagesRepo>,
    pub posts: Arc<dyn PostsRepo>,
    pub announcements: Arc<dyn AnnouncementsRepo>,
    pub events: Arc<dyn EventsRepo>,
    pub catalog: Arc<dyn CatalogRepo>,
    pub media: Arc<dyn MediaRepo>,
    pub fatwas: Arc<dyn FatwasRepo>,
    pub inbox: Arc<dyn InboxRepo>,
    pub menus: Arc<dyn MenusRepo>,
    pub settings: Arc<dyn SettingsRepo>,
}

#[derive(Clone)]
pub struct PublicSiteService {
    repos: PublicSiteRepos,
}

impl PublicSiteService {
    pub fn new(repos: PublicSiteRepos) -> Self {
        Self { repos }
    }

    pub async fn site_summary(&self) -> Result<SiteSummary, PublicSiteError> {
        let (settings, menu, home, posts, events) = tokio::try_join!(
            self.repos.settings.load_site_settings(),
            self.repos.menus.list_visible_menu_links(),
            self.repos.pages.find_page_by_slug(HOME_PAGE_SLUG),
            self.repos.posts.list_posts(ContentScope::Published),
            self.repos.events.list_events(true),
        )?;

        Ok(SiteSummary {
            settings,
            menu,
            home: home.filter(|page| page.status == ContentStatus::Published),
            latest_posts: with_assets(posts.into_iter().take(SUMMARY_POSTS).collect()),
            events: events.into_iter().take(SUMMARY_EVENTS).collect(),
        })
    }

    pub async fn menus(&self) -> Result<Vec<MenuLinkRecord>, PublicSiteError> {
        Ok(self.repos.menus.list_visible_menu_links().await?)
    }

    pub async fn page(&self, slug: &str) -> Result<PageRecord, PublicSiteError> {
        self.repos
            .pages
            .find_page_by_slug(slug)
            .await?
            .filter(|page| page.status == ContentStatus::Published)
            .ok_or(PublicSiteError::NotFound("page"))
    }

    pub async fn posts(
        &self,
        page: Option<u32>,
    ) -> Result<Paginated<WithAssets<PostRecord>>, PublicSiteError> {
        let request = PageRequest::from_query(page, None, POSTS_PER_PAGE);
        let posts = self.repos.posts.list_published_posts(request).await?;
        Ok(posts.map(PublicAssets::with_assets))
    }

    /// Look a post up by slug, or by id when the parameter is a UUID.
    pub async fn post(&self, slug_or_id: &str) -> Result<WithAssets<PostRecord>, PublicSiteError> {
        let mut found = self.repos.posts.find_post_by_slug(slug_or_id).await?;
        if found.is_none() {
            if let Ok(id) = Uuid::parse_str(slug_or_id) {
                found = self.repos.posts.find_post_by_id(id).await?;
            }
        }
        found
            .filter(|post| post.status == ContentStatus::Published)
            .map(PublicAssets::with_assets)
            .ok_or(PublicSiteError::NotFound("post"))
    }

    pub async fn announcements(
        &self,
        page: Option<u32>,
    ) -> Result<Paginated<AnnouncementRecord>, PublicSiteError> {
        let request = PageRequest::from_query(page, None, ANNOUNCEMENTS_PER_PAGE);
        Ok(self
            .repos
            .announcements
            .list_visible_announcements(OffsetDateTime::now_utc(), request)
            .await?)
    }

    pub async fn announcement(&self, id: Uuid) -> Result<AnnouncementRecord, PublicSiteError> {
        let now = OffsetDateTime::now_utc();
        self.repos
            .announcements
            .find_announcement(id)
            .await?
            .filter(|announcement| announcement.is_visible_at(now))
            .ok_or(PublicSiteError::NotFound("announcement"))
    }

    pub async fn events(&self, search: Option<&str>) -> Result<Vec<EventRecord>, PublicSiteError> {
        let events = self.repos.events.list_events(true).await?;
        Ok(retain_matching(events, search))
    }

    /// Gallery items; an unknown category slug falls back to every item.
    pub async fn media(
        &self,
        category_slug: Option<&str>,
        page: Option<u32>,
    ) -> Result<Paginated<WithAssets<MediaRecord>>, PublicSiteError> {
        let category_id = match category_slug.map(str::trim).filter(|slug| !slug.is_empty()) {
            Some(slug) => self
                .repos
                .media
                .find_media_category_by_slug(slug)
                .await?
                .map(|category| category.id),
            None => None,
        };
        let request = PageRequest::from_query(page, None, MEDIA_PER_PAGE);
        let media = self.repos.media.list_media(category_id, request).await?;
        Ok(media.map(PublicAssets::with_assets))
    }

    pub async fn media_categories(
        &self,
    ) -> Result<Vec<WithAssets<MediaCategoryRecord>>, PublicSiteError> {
        let categories = self.repos.media.list_media_categories().await?;
        Ok(with_assets(categories))
    }

    pub async fn library(
        &self,
        query: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<WithAssets<BookRecord>>, PublicSiteError> {
        let category = category.map(str::trim).filter(|value| !value.is_empty());
        let books = self.repos.catalog.list_books(category).await?;
        Ok(with_assets(retain_matching(books, query)))
    }

    pub async fn book(&self, id: Uuid) -> Result<WithAssets<BookRecord>, PublicSiteError> {
        self.repos
            .catalog
            .find_book(id)
            .await?
            .filter(|book| book.status == ContentStatus::Published)
            .map(PublicAssets::with_assets)
            .ok_or(PublicSiteError::NotFound("book"))
    }

    pub async fn courses(
        &self,
        query: &CourseQuery,
    ) -> Result<Vec<WithAssets<CourseRecord>>, PublicSiteError> {
        let filter = CourseQueryFilter {
            category: non_blank(query.category.as_deref()),
            level: non_blank(query.level.as_deref()),
        };
        let courses = self.repos.catalog.list_courses(&filter).await?;
        Ok(with_assets(retain_matching(courses, query.search.as_deref())))
    }

    pub async fn course(&self, id: Uuid) -> Result<WithAssets<CourseRecord>, PublicSiteError> {
        self.repos
            .catalog
            .find_course(id)
            .await?
            .filter(|course| course.status == ContentStatus::Published)
            .map(PublicAssets::with_assets)
            .ok_or(PublicSiteError::NotFound("course"))
    }

    pub async fn scholars(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<WithAssets<ScholarRecord>>, PublicSiteError> {
        let scholars = self.repos.catalog.list_scholars().await?;
        Ok(with_assets(retain_matching(scholars, search)))
    }

    pub async fn graduates(
        &self,
        year: Option<i32>,
        search: Option<&str>,
    ) -> Result<Vec<WithAssets<GraduateRecord>>, PublicSiteError> {
        let graduates = self.repos.catalog.list_graduates(year).await?;
        Ok(with_assets(retain_matching(graduates, search)))
    }

    pub async fn donations(&self) -> Result<Vec<DonationRecord>, PublicSiteError> {
        Ok(self.repos.catalog.list_donations().await?)
    }

    pub async fn fatwas(
        &self,
        category_slug: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<FatwaRecord>, PublicSiteError> {
        let category_id = match category_slug.map(str::trim).filter(|slug| !slug.is_empty()) {
            Some(slug) => match self.repos.fatwas.find_fatwa_category_by_slug(slug).await? {
                Some(category) => Some(category.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        let fatwas = self.repos.fatwas.list_fatwas(category_id).await?;
        Ok(retain_matching(fatwas, search))
    }

    pub async fn fatwa_categories(&self) -> Result<Vec<FatwaCategoryRecord>, PublicSiteError> {
        Ok(self.repos.fatwas.list_fatwa_categories().await?)
    }

    pub async fn fatwa(&self, slug: &str) -> Result<FatwaRecord, PublicSiteError> {
        self.repos
            .fatwas
            .find_fatwa_by_slug(slug)
            .await?
            .filter(|fatwa| fatwa.status == ContentStatus::Published)
            .ok_or(PublicSiteError::NotFound("fatwa"))
    }

    /// Store a contact-form entry as a new inbox message.
    pub async fn submit_contact(
        &self,
        submission: ContactSubmission,
    ) -> Result<InboxMessageRecord, PublicSiteError> {
        let contact = ContactMessage::validate(
            &submission.first_name,
            &submission.last_name,
            &submission.email,
            submission.phone.as_deref(),
            &submission.subject,
            &submission.message,
        )?;

        let message = self
            .repos
            .inbox
            .create_message(CreateInboxMessageParams {
                name: contact.name,
                email: Some(contact.email),
                phone: contact.phone,
                subject: Some(contact.subject),
                message: contact.message,
            })
            .await?;

        metrics::counter!("nazim_contact_submissions_total").increment(1);
        tracing::info!(
            target = "nazim_site::application::public_site",
            message_id = %message.id,
            "contact message received"
        );
        Ok(message)
    }

    pub async fn submit_fatwa_question(
        &self,
        submission: FatwaQuestionSubmission,
    ) -> Result<FatwaQuestionRecord, PublicSiteError> {
        let question = FatwaQuestion::validate(
            submission.name.as_deref(),
            submission.email.as_deref(),
            submission.category_id,
            &submission.question_text,
        )?;

        let record = self
            .repos
            .fatwas
            .create_fatwa_question(CreateFatwaQuestionParams {
                name: question.name,
                email: question.email,
                category_id: question.category_id,
                question_text: question.question_text,
            })
            .await?;

        metrics::counter!("nazim_fatwa_questions_total").increment(1);
        tracing::info!(
            target = "nazim_site::application::public_site",
            question_id = %record.id,
            "fatwa question received"
        );
        Ok(record)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
