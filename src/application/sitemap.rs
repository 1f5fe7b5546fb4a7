//! Sitemap and robots.txt generation for the public site.

use std::sync::Arc;

use thiserror::Error;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::application::pagination::{MAX_PER_PAGE, PageRequest};
use crate::application::repos::{
    AnnouncementsRepo, ContentScope, PagesRepo, PostsRepo, RepoError, SettingsRepo,
};

const LASTMOD_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("failed to load settings: {0}")]
    Settings(#[source] RepoError),
    #[error("failed to list content: {0}")]
    Content(#[from] RepoError),
}

#[derive(Clone)]
pub struct SitemapService {
    pages: Arc<dyn PagesRepo>,
    posts: Arc<dyn PostsRepo>,
    announcements: Arc<dyn AnnouncementsRepo>,
    settings: Arc<dyn SettingsRepo>,
}

impl SitemapService {
    pub fn new(
        pages: Arc<dyn PagesRepo>,
        posts: Arc<dyn PostsRepo>,
        announcements: Arc<dyn AnnouncementsRepo>,
        settings: Arc<dyn SettingsRepo>,
    ) -> Self {
        Self {
            pages,
            posts,
            announcements,
            settings,
        }
    }

    pub async fn sitemap_xml(&self) -> Result<String, SitemapError> {
        let base = self.base_url().await?;
        let mut entries = vec![sitemap_entry(&base, "/", None)];

        for page in self.pages.list_pages(ContentScope::Published).await? {
            entries.push(sitemap_entry(
                &base,
                &format!("/pages/{}", page.slug),
                Some(page.updated_at),
            ));
        }

        for post in self.posts.list_posts(ContentScope::Published).await? {
            entries.push(sitemap_entry(
                &base,
                &format!("/articles/{}", post.slug),
                Some(post.updated_at),
            ));
        }

        let now = OffsetDateTime::now_utc();
        let mut request = PageRequest::new(1, MAX_PER_PAGE);
        loop {
            let batch = self
                .announcements
                .list_visible_announcements(now, request)
                .await?;
            let has_next = batch.has_next();
            for announcement in batch.data {
                entries.push(sitemap_entry(
                    &base,
                    &format!("/announcements/{}", announcement.id),
                    Some(announcement.updated_at),
                ));
            }
            if !has_next {
                break;
            }
            request = PageRequest::new(request.page() + 1, MAX_PER_PAGE);
        }

        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for entry in entries {
            xml.push_str(&entry);
        }
        xml.push_str("</urlset>\n");
        Ok(xml)
    }

    pub async fn robots_txt(&self) -> Result<String, SitemapError> {
        let base = self.base_url().await?;
        Ok(format!(
            "User-agent: *\nAllow: /\nSitemap: {}\n",
            canonical_url(&base, "/sitemap.xml")
        ))
    }

    async fn base_url(&self) -> Result<String, SitemapError> {
        let settings = self
            .settings
            .load_site_settings()
            .await
            .map_err(SitemapError::Settings)?;
        Ok(settings.public_site_url.trim_end_matches('/').to_string())
    }
}

fn sitemap_entry(base: &str, path: &str, lastmod: Option<OffsetDateTime>) -> String {
    let loc = xml_escape(&canonical_url(base, path));
    match lastmod.and_then(|at| at.format(LASTMOD_FORMAT).ok()) {
        Some(lastmod) => format!("  <url><loc>{loc}</loc><lastmod>{lastmod}</lastmod></url>\n"),
        None => format!("  <url><loc>{loc}</loc></url>\n"),
    }
}

fn canonical_url(base: &str, path: &str) -> String {
    if path == "/" {
        format!("{base}/")
    } else {
        format!("{base}{path}")
    }
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
