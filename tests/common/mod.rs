#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use time::{OffsetDateTime, macros::datetime};
use tokio::sync::Mutex;
use uuid::Uuid;

use nazim_site::application::admin::{
    AdminAuditService, AdminEventService, AdminInboxService, AdminSeoService, AdminSettingsService,
};
use nazim_site::application::pagination::{PageRequest, Paginated, paginate_items};
use nazim_site::application::public_site::{PublicSiteRepos, PublicSiteService};
use nazim_site::application::repos::{
    AnnouncementsRepo, AuditQueryFilter, AuditRepo, CatalogRepo, ContentScope,
    ContentSeoWriteRepo, CourseQueryFilter, CreateFatwaQuestionParams, CreateInboxMessageParams,
    EventParams, EventsRepo, EventsWriteRepo, FatwasRepo, HealthRepo, InboxQueryFilter, InboxRepo,
    MediaRepo, MenusRepo, PagesRepo, PostsRepo, RepoError, SettingsRepo,
};
use nazim_site::application::sitemap::SitemapService;
use nazim_site::domain::entities::{
    AnnouncementRecord, AuditLogRecord, BookRecord, CourseRecord, DonationRecord, EventRecord,
    FatwaCategoryRecord, FatwaQuestionRecord, FatwaRecord, GraduateRecord, InboxMessageRecord,
    MediaCategoryRecord, MediaRecord, MenuLinkRecord, PageRecord, PostRecord, ScholarRecord,
    SiteSettingsRecord,
};
use nazim_site::domain::search::retain_matching;
use nazim_site::domain::seo::SeoMetadata;
use nazim_site::domain::types::{ContentStatus, FatwaQuestionStatus, InboxStatus};
use nazim_site::infra::cache::ResponseCache;
use nazim_site::infra::http::{AdminState, PublicState, SubmissionRateLimiter};

pub const STAMP: OffsetDateTime = datetime!(2026-03-01 09:00 UTC);

/// Every repository trait backed by plain vectors.
pub struct MemoryStore {
    pub pages: Mutex<Vec<PageRecord>>,
    pub posts: Mutex<Vec<PostRecord>>,
    pub announcements: Mutex<Vec<AnnouncementRecord>>,
    pub events: Mutex<Vec<EventRecord>>,
    pub courses: Mutex<Vec<CourseRecord>>,
    pub books: Mutex<Vec<BookRecord>>,
    pub scholars: Mutex<Vec<ScholarRecord>>,
    pub graduates: Mutex<Vec<GraduateRecord>>,
    pub donations: Mutex<Vec<DonationRecord>>,
    pub media_categories: Mutex<Vec<MediaCategoryRecord>>,
    pub media: Mutex<Vec<MediaRecord>>,
    pub fatwa_categories: Mutex<Vec<FatwaCategoryRecord>>,
    pub fatwas: Mutex<Vec<FatwaRecord>>,
    pub fatwa_questions: Mutex<Vec<FatwaQuestionRecord>>,
    pub inbox: Mutex<Vec<InboxMessageRecord>>,
    pub menu_links: Mutex<Vec<MenuLinkRecord>>,
    pub settings: Mutex<SiteSettingsRecord>,
    pub audit: Mutex<Vec<AuditLogRecord>>,
    pub healthy: AtomicBool,
    /// When set, every list call fails with a persistence error.
    pub failing: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            pages: Mutex::default(),
            posts: Mutex::default(),
            announcements: Mutex::default(),
            events: Mutex::default(),
            courses: Mutex::default(),
            books: Mutex::default(),
            scholars: Mutex::default(),
            graduates: Mutex::default(),
            donations: Mutex::default(),
            media_categories: Mutex::default(),
            media: Mutex::default(),
            fatwa_categories: Mutex::default(),
            fatwas: Mutex::default(),
            fatwa_questions: Mutex::default(),
            inbox: Mutex::default(),
            menu_links: Mutex::default(),
            settings: Mutex::new(default_settings()),
            audit: Mutex::default(),
            healthy: AtomicBool::new(true),
            failing: AtomicBool::new(false),
        }
    }
}

impl MemoryStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepoError::Persistence("store unavailable".into()));
        }
        Ok(())
    }

    pub async fn audit_actions(&self) -> Vec<String> {
        self.audit
            .lock()
            .await
            .iter()
            .map(|entry| entry.action.clone())
            .collect()
    }
}

fn scope_allows(scope: ContentScope, status: ContentStatus) -> bool {
    match scope {
        ContentScope::All => true,
        ContentScope::Published => status == ContentStatus::Published,
    }
}

#[async_trait]
impl PagesRepo for MemoryStore {
    async fn list_pages(&self, scope: ContentScope) -> Result<Vec<PageRecord>, RepoError> {
        self.check()?;
        let mut pages: Vec<_> = self
            .pages
            .lock()
            .await
            .iter()
            .filter(|page| scope_allows(scope, page.status))
            .cloned()
            .collect();
        pages.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(pages)
    }

    async fn find_page_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, RepoError> {
        let pages = self.pages.lock().await;
        Ok(pages.iter().find(|page| page.slug == slug).cloned())
    }
}

#[async_trait]
impl PostsRepo for MemoryStore {
    async fn list_posts(&self, scope: ContentScope) -> Result<Vec<PostRecord>, RepoError> {
        self.check()?;
        let mut posts: Vec<_> = self
            .posts
            .lock()
            .await
            .iter()
            .filter(|post| scope_allows(scope, post.status))
            .cloned()
            .collect();
        posts.sort_by(|a, b| match (a.published_at, b.published_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(posts)
    }

    async fn list_published_posts(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<PostRecord>, RepoError> {
        let posts = self.list_posts(ContentScope::Published).await?;
        Ok(paginate_items(posts, page))
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.lock().await;
        Ok(posts.iter().find(|post| post.slug == slug).cloned())
    }

    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.lock().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }
}

#[async_trait]
impl AnnouncementsRepo for MemoryStore {
    async fn list_visible_announcements(
        &self,
        now: OffsetDateTime,
        page: PageRequest,
    ) -> Result<Paginated<AnnouncementRecord>, RepoError> {
        self.check()?;
        let mut visible: Vec<_> = self
            .announcements
            .lock()
            .await
            .iter()
            .filter(|announcement| announcement.is_visible_at(now))
            .cloned()
            .collect();
        visible.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.published_at.cmp(&a.published_at))
        });
        Ok(paginate_items(visible, page))
    }

    async fn find_announcement(&self, id: Uuid) -> Result<Option<AnnouncementRecord>, RepoError> {
        let announcements = self.announcements.lock().await;
        Ok(announcements.iter().find(|a| a.id == id).cloned())
    }
}

#[async_trait]
impl EventsRepo for MemoryStore {
    async fn list_events(&self, public_only: bool) -> Result<Vec<EventRecord>, RepoError> {
        self.check()?;
        let mut events: Vec<_> = self
            .events
            .lock()
            .await
            .iter()
            .filter(|event| !public_only || event.is_public)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.starts_at);
        Ok(events)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<EventRecord>, RepoError> {
        let events = self.events.lock().await;
        Ok(events.iter().find(|event| event.id == id).cloned())
    }
}

#[async_trait]
impl EventsWriteRepo for MemoryStore {
    async fn create_event(&self, params: EventParams) -> Result<EventRecord, RepoError> {
        let now = OffsetDateTime::now_utc();
        let record = EventRecord {
            id: Uuid::new_v4(),
            title: params.title,
            location: params.location,
            summary: params.summary,
            starts_at: params.starts_at,
            ends_at: params.ends_at,
            is_public: params.is_public,
            created_at: now,
            updated_at: now,
        };
        self.events.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update_event(&self, id: Uuid, params: EventParams) -> Result<EventRecord, RepoError> {
        let mut events = self.events.lock().await;
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(RepoError::NotFound)?;
        event.title = params.title;
        event.location = params.location;
        event.summary = params.summary;
        event.starts_at = params.starts_at;
        event.ends_at = params.ends_at;
        event.is_public = params.is_public;
        event.updated_at = OffsetDateTime::now_utc();
        Ok(event.clone())
    }

    async fn delete_event(&self, id: Uuid) -> Result<(), RepoError> {
        let mut events = self.events.lock().await;
        let before = events.len();
        events.retain(|event| event.id != id);
        if events.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepo for MemoryStore {
    async fn list_courses(
        &self,
        filter: &CourseQueryFilter,
    ) -> Result<Vec<CourseRecord>, RepoError> {
        self.check()?;
        let courses = self.courses.lock().await;
        Ok(courses
            .iter()
            .filter(|course| course.status == ContentStatus::Published)
            .filter(|course| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|category| course.category.as_ref() == Some(category))
            })
            .filter(|course| {
                filter
                    .level
                    .as_ref()
                    .is_none_or(|level| course.level.as_ref() == Some(level))
            })
            .cloned()
            .collect())
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<CourseRecord>, RepoError> {
        let courses = self.courses.lock().await;
        Ok(courses.iter().find(|course| course.id == id).cloned())
    }

    async fn list_books(&self, category: Option<&str>) -> Result<Vec<BookRecord>, RepoError> {
        self.check()?;
        let books = self.books.lock().await;
        Ok(books
            .iter()
            .filter(|book| book.status == ContentStatus::Published)
            .filter(|book| category.is_none_or(|category| book.category.as_deref() == Some(category)))
            .cloned()
            .collect())
    }

    async fn find_book(&self, id: Uuid) -> Result<Option<BookRecord>, RepoError> {
        let books = self.books.lock().await;
        Ok(books.iter().find(|book| book.id == id).cloned())
    }

    async fn list_scholars(&self) -> Result<Vec<ScholarRecord>, RepoError> {
        self.check()?;
        Ok(self.scholars.lock().await.clone())
    }

    async fn list_graduates(&self, year: Option<i32>) -> Result<Vec<GraduateRecord>, RepoError> {
        self.check()?;
        let graduates = self.graduates.lock().await;
        Ok(graduates
            .iter()
            .filter(|graduate| year.is_none_or(|year| graduate.graduation_year == Some(year)))
            .cloned()
            .collect())
    }

    async fn list_donations(&self) -> Result<Vec<DonationRecord>, RepoError> {
        self.check()?;
        let donations = self.donations.lock().await;
        Ok(donations.iter().filter(|d| d.is_active).cloned().collect())
    }
}

#[async_trait]
impl MediaRepo for MemoryStore {
    async fn list_media_categories(&self) -> Result<Vec<MediaCategoryRecord>, RepoError> {
        self.check()?;
        let categories = self.media_categories.lock().await;
        Ok(categories.iter().filter(|c| c.is_active).cloned().collect())
    }

    async fn find_media_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<MediaCategoryRecord>, RepoError> {
        let categories = self.media_categories.lock().await;
        Ok(categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn list_media(
        &self,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Paginated<MediaRecord>, RepoError> {
        self.check()?;
        let media: Vec<_> = self
            .media
            .lock()
            .await
            .iter()
            .filter(|item| category_id.is_none_or(|id| item.category_id == Some(id)))
            .cloned()
            .collect();
        Ok(paginate_items(media, page))
    }
}

#[async_trait]
impl FatwasRepo for MemoryStore {
    async fn list_fatwa_categories(&self) -> Result<Vec<FatwaCategoryRecord>, RepoError> {
        self.check()?;
        Ok(self.fatwa_categories.lock().await.clone())
    }

    async fn find_fatwa_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<FatwaCategoryRecord>, RepoError> {
        let categories = self.fatwa_categories.lock().await;
        Ok(categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn list_fatwas(&self, category_id: Option<Uuid>) -> Result<Vec<FatwaRecord>, RepoError> {
        self.check()?;
        let fatwas = self.fatwas.lock().await;
        Ok(fatwas
            .iter()
            .filter(|fatwa| fatwa.status == ContentStatus::Published)
            .filter(|fatwa| category_id.is_none_or(|id| fatwa.category_id == Some(id)))
            .cloned()
            .collect())
    }

    async fn find_fatwa_by_slug(&self, slug: &str) -> Result<Option<FatwaRecord>, RepoError> {
        let fatwas = self.fatwas.lock().await;
        Ok(fatwas.iter().find(|fatwa| fatwa.slug == slug).cloned())
    }

    async fn create_fatwa_question(
        &self,
        params: CreateFatwaQuestionParams,
    ) -> Result<FatwaQuestionRecord, RepoError> {
        let now = OffsetDateTime::now_utc();
        let record = FatwaQuestionRecord {
            id: Uuid::new_v4(),
            name: params.name,
            email: params.email,
            category_id: params.category_id,
            question_text: params.question_text,
            status: FatwaQuestionStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.fatwa_questions.lock().await.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl InboxRepo for MemoryStore {
    async fn list_messages(
        &self,
        filter: &InboxQueryFilter,
        page: PageRequest,
    ) -> Result<Paginated<InboxMessageRecord>, RepoError> {
        self.check()?;
        let mut messages: Vec<_> = self
            .inbox
            .lock()
            .await
            .iter()
            .filter(|message| filter.status.is_none_or(|status| message.status == status))
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let messages = retain_matching(messages, filter.search.as_deref());
        Ok(paginate_items(messages, page))
    }

    async fn count_by_status(&self) -> Result<Vec<(InboxStatus, u64)>, RepoError> {
        self.check()?;
        let messages = self.inbox.lock().await;
        Ok(InboxStatus::ALL
            .into_iter()
            .map(|status| {
                let count = messages.iter().filter(|m| m.status == status).count();
                (status, count as u64)
            })
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    async fn find_message(&self, id: Uuid) -> Result<Option<InboxMessageRecord>, RepoError> {
        let messages = self.inbox.lock().await;
        Ok(messages.iter().find(|m| m.id == id).cloned())
    }

    async fn create_message(
        &self,
        params: CreateInboxMessageParams,
    ) -> Result<InboxMessageRecord, RepoError> {
        let now = OffsetDateTime::now_utc();
        let record = InboxMessageRecord {
            id: Uuid::new_v4(),
            name: params.name,
            email: params.email,
            phone: params.phone,
            subject: params.subject,
            message: params.message,
            status: InboxStatus::New,
            replied_at: None,
            created_at: now,
            updated_at: now,
        };
        self.inbox.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update_message_status(
        &self,
        id: Uuid,
        status: InboxStatus,
        replied_at: Option<OffsetDateTime>,
    ) -> Result<InboxMessageRecord, RepoError> {
        let mut messages = self.inbox.lock().await;
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RepoError::NotFound)?;
        message.status = status;
        if replied_at.is_some() {
            message.replied_at = replied_at;
        }
        message.updated_at = OffsetDateTime::now_utc();
        Ok(message.clone())
    }

    async fn delete_message(&self, id: Uuid) -> Result<(), RepoError> {
        let mut messages = self.inbox.lock().await;
        let before = messages.len();
        messages.retain(|m| m.id != id);
        if messages.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsRepo for MemoryStore {
    async fn load_site_settings(&self) -> Result<SiteSettingsRecord, RepoError> {
        self.check()?;
        Ok(self.settings.lock().await.clone())
    }

    async fn upsert_site_settings(&self, settings: SiteSettingsRecord) -> Result<(), RepoError> {
        *self.settings.lock().await = settings;
        Ok(())
    }
}

#[async_trait]
impl ContentSeoWriteRepo for MemoryStore {
    async fn update_page_seo(
        &self,
        id: Uuid,
        metadata: &SeoMetadata,
    ) -> Result<PageRecord, RepoError> {
        let mut pages = self.pages.lock().await;
        let page = pages
            .iter_mut()
            .find(|page| page.id == id)
            .ok_or(RepoError::NotFound)?;
        page.seo_title = metadata.seo_title.clone();
        page.seo_description = metadata.seo_description.clone();
        page.seo_image_path = metadata.seo_image_path.clone();
        Ok(page.clone())
    }

    async fn update_post_seo(
        &self,
        id: Uuid,
        metadata: &SeoMetadata,
    ) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.lock().await;
        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(RepoError::NotFound)?;
        post.seo_title = metadata.seo_title.clone();
        post.seo_description = metadata.seo_description.clone();
        post.seo_image_path = metadata.seo_image_path.clone();
        Ok(post.clone())
    }
}

#[async_trait]
impl MenusRepo for MemoryStore {
    async fn list_visible_menu_links(&self) -> Result<Vec<MenuLinkRecord>, RepoError> {
        self.check()?;
        let mut links: Vec<_> = self
            .menu_links
            .lock()
            .await
            .iter()
            .filter(|link| link.is_visible)
            .cloned()
            .collect();
        links.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.label.cmp(&b.label))
        });
        Ok(links)
    }
}

#[async_trait]
impl AuditRepo for MemoryStore {
    async fn append_log(&self, record: AuditLogRecord) -> Result<(), RepoError> {
        self.audit.lock().await.push(record);
        Ok(())
    }

    async fn list_logs(
        &self,
        filter: &AuditQueryFilter,
        page: PageRequest,
    ) -> Result<Paginated<AuditLogRecord>, RepoError> {
        let accepts = |wanted: &Option<String>, value: &str| {
            wanted.as_deref().is_none_or(|wanted| wanted == value)
        };
        let mut entries: Vec<_> = self
            .audit
            .lock()
            .await
            .iter()
            .filter(|entry| accepts(&filter.actor, &entry.actor))
            .filter(|entry| accepts(&filter.action, &entry.action))
            .filter(|entry| accepts(&filter.entity_type, &entry.entity_type))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate_items(entries, page))
    }
}

#[async_trait]
impl HealthRepo for MemoryStore {
    async fn ping(&self) -> Result<(), RepoError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepoError::Timeout)
        }
    }
}

pub fn public_site(store: &Arc<MemoryStore>) -> PublicSiteService {
    PublicSiteService::new(PublicSiteRepos {
        pages: store.clone(),
        posts: store.clone(),
        announcements: store.clone(),
        events: store.clone(),
        catalog: store.clone(),
        media: store.clone(),
        fatwas: store.clone(),
        inbox: store.clone(),
        menus: store.clone(),
        settings: store.clone(),
    })
}

pub fn inbox_service(store: &Arc<MemoryStore>) -> AdminInboxService {
    AdminInboxService::new(store.clone(), AdminAuditService::new(store.clone()))
}

pub fn seo_service(store: &Arc<MemoryStore>) -> AdminSeoService {
    AdminSeoService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        AdminAuditService::new(store.clone()),
    )
}

pub fn public_state(
    store: &Arc<MemoryStore>,
    cache: ResponseCache,
    max_submissions: u32,
) -> PublicState {
    PublicState {
        site: Arc::new(public_site(store)),
        sitemap: Arc::new(SitemapService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        health: store.clone(),
        cache,
        limiter: SubmissionRateLimiter::new(Duration::from_secs(60), max_submissions),
    }
}

pub fn admin_state(store: &Arc<MemoryStore>, cache: ResponseCache) -> AdminState {
    let audit = AdminAuditService::new(store.clone());
    AdminState {
        events: Arc::new(AdminEventService::new(
            store.clone(),
            store.clone(),
            audit.clone(),
        )),
        inbox: Arc::new(AdminInboxService::new(store.clone(), audit.clone())),
        seo: Arc::new(seo_service(store)),
        settings: Arc::new(AdminSettingsService::new(store.clone(), audit.clone())),
        audit: Arc::new(audit),
        health: store.clone(),
        cache,
    }
}

pub fn default_settings() -> SiteSettingsRecord {
    SiteSettingsRecord {
        school_name: "Al-Noor Madrasa".into(),
        school_slug: "al-noor".into(),
        is_public: true,
        default_language: "en".into(),
        enabled_languages: vec!["en".into(), "ar".into()],
        theme: json!({}),
        public_site_url: "https://alnoor.example.org/".into(),
        updated_at: STAMP,
    }
}

pub fn page(slug: &str, title: &str, seo_title: Option<&str>, seo_description: Option<&str>) -> PageRecord {
    PageRecord {
        id: Uuid::new_v4(),
        slug: slug.into(),
        title: title.into(),
        content: String::new(),
        status: ContentStatus::Published,
        seo_title: seo_title.map(Into::into),
        seo_description: seo_description.map(Into::into),
        seo_image_path: None,
        published_at: Some(STAMP),
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn post(slug: &str, title: &str, seo_title: Option<&str>, seo_description: Option<&str>) -> PostRecord {
    PostRecord {
        id: Uuid::new_v4(),
        slug: slug.into(),
        title: title.into(),
        excerpt: None,
        content: String::new(),
        status: ContentStatus::Published,
        seo_title: seo_title.map(Into::into),
        seo_description: seo_description.map(Into::into),
        seo_image_path: None,
        published_at: Some(STAMP),
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn message(name: &str, status: InboxStatus, minutes_after: i64) -> InboxMessageRecord {
    let created_at = STAMP + time::Duration::minutes(minutes_after);
    InboxMessageRecord {
        id: Uuid::new_v4(),
        name: name.into(),
        email: Some(format!("{}@example.org", name.to_lowercase().replace(' ', "."))),
        phone: None,
        subject: Some(format!("Question from {name}")),
        message: "Assalamu alaikum, I would like to ask about admissions.".into(),
        status,
        replied_at: None,
        created_at,
        updated_at: created_at,
    }
}

pub fn announcement(title: &str, pinned: bool, published_minutes_ago: i64) -> AnnouncementRecord {
    let published_at = OffsetDateTime::now_utc() - time::Duration::minutes(published_minutes_ago);
    AnnouncementRecord {
        id: Uuid::new_v4(),
        title: title.into(),
        body: String::new(),
        status: ContentStatus::Published,
        is_pinned: pinned,
        published_at: Some(published_at),
        expires_at: None,
        created_at: published_at,
        updated_at: published_at,
    }
}

pub fn media_category(slug: &str) -> MediaCategoryRecord {
    MediaCategoryRecord {
        id: Uuid::new_v4(),
        name: slug.to_uppercase(),
        slug: slug.into(),
        description: None,
        cover_image_path: Some(format!("media/{slug}/cover.jpg")),
        is_active: true,
        sort_order: 0,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn media_item(category_id: Option<Uuid>, file_path: &str) -> MediaRecord {
    MediaRecord {
        id: Uuid::new_v4(),
        category_id,
        title: None,
        description: None,
        media_type: "image".into(),
        file_path: file_path.into(),
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn event(title: &str, is_public: bool, days_ahead: i64) -> EventRecord {
    let starts_at = STAMP + time::Duration::days(days_ahead);
    EventRecord {
        id: Uuid::new_v4(),
        title: title.into(),
        location: Some("Main hall".into()),
        summary: None,
        starts_at,
        ends_at: None,
        is_public,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn fatwa_category(slug: &str) -> FatwaCategoryRecord {
    FatwaCategoryRecord {
        id: Uuid::new_v4(),
        name: slug.to_uppercase(),
        slug: slug.into(),
        description: None,
        is_active: true,
        sort_order: 0,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn fatwa(slug: &str, title: &str, category_id: Option<Uuid>) -> FatwaRecord {
    FatwaRecord {
        id: Uuid::new_v4(),
        slug: slug.into(),
        title: title.into(),
        category_id,
        question_text: None,
        answer_text: None,
        status: ContentStatus::Published,
        is_featured: false,
        published_at: Some(STAMP),
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn menu_link(label: &str, sort_order: i32, is_visible: bool) -> MenuLinkRecord {
    MenuLinkRecord {
        id: Uuid::new_v4(),
        parent_id: None,
        label: label.into(),
        url: format!("/{}", label.to_lowercase()),
        is_visible,
        sort_order,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn audit_entry(actor: &str, action: &str, minutes_after: i64) -> AuditLogRecord {
    AuditLogRecord {
        id: Uuid::new_v4(),
        actor: actor.into(),
        action: action.into(),
        entity_type: action.split('.').next().unwrap_or(action).into(),
        entity_id: None,
        payload_text: None,
        created_at: STAMP + time::Duration::minutes(minutes_after),
    }
}
