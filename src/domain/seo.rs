//! SEO metadata completeness audit over pages and posts.
//!
//! Everything here is pure: callers load the content, this module projects it
//! into [`SeoItem`]s, filters them and computes coverage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{
    entities::{PageRecord, PostRecord},
    error::DomainError,
    events::{check_len, non_blank},
    types::{ContentStatus, SeoItemType},
};

pub const SEO_TITLE_MAX_CHARS: usize = 255;
pub const SEO_DESCRIPTION_MAX_CHARS: usize = 500;
pub const SEO_IMAGE_PATH_MAX_CHARS: usize = 500;

/// A page or post projected into a uniform shape for metadata auditing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub item_type: SeoItemType,
    pub title: String,
    pub slug: String,
    pub status: Option<ContentStatus>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    pub missing_title: bool,
    pub missing_description: bool,
    pub missing_image: bool,
}

impl SeoItem {
    pub fn from_page(page: &PageRecord) -> Self {
        Self {
            id: page.id,
            item_type: SeoItemType::Page,
            title: page.title.clone(),
            slug: page.slug.clone(),
            status: Some(page.status),
            published_at: page.published_at,
            missing_title: is_missing(page.seo_title.as_deref()),
            missing_description: is_missing(page.seo_description.as_deref()),
            missing_image: is_missing(page.seo_image_path.as_deref()),
        }
    }

    pub fn from_post(post: &PostRecord) -> Self {
        Self {
            id: post.id,
            item_type: SeoItemType::Post,
            title: post.title.clone(),
            slug: post.slug.clone(),
            status: Some(post.status),
            published_at: post.published_at,
            missing_title: is_missing(post.seo_title.as_deref()),
            missing_description: is_missing(post.seo_description.as_deref()),
            missing_image: is_missing(post.seo_image_path.as_deref()),
        }
    }

    pub fn needs_attention(&self) -> bool {
        self.missing_title || self.missing_description || self.missing_image
    }
}

// Whitespace-only values count as present.
fn is_missing(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Pages first, then posts, each in source order.
pub fn build_seo_items(pages: &[PageRecord], posts: &[PostRecord]) -> Vec<SeoItem> {
    pages
        .iter()
        .map(SeoItem::from_page)
        .chain(posts.iter().map(SeoItem::from_post))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeoTypeFilter {
    #[default]
    All,
    Page,
    Post,
}

impl SeoTypeFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "page" | "pages" => Some(Self::Page),
            "post" | "posts" => Some(Self::Post),
            _ => None,
        }
    }

    fn matches(self, item_type: SeoItemType) -> bool {
        match self {
            Self::All => true,
            Self::Page => item_type == SeoItemType::Page,
            Self::Post => item_type == SeoItemType::Post,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeoStatusFilter {
    #[default]
    All,
    NeedsAttention,
    Complete,
}

impl SeoStatusFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "needs" | "needs_attention" | "needs-attention" => Some(Self::NeedsAttention),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }

    fn matches(self, item: &SeoItem) -> bool {
        match self {
            Self::All => true,
            Self::NeedsAttention => item.needs_attention(),
            Self::Complete => !item.needs_attention(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoQuery {
    pub search: String,
    pub item_type: SeoTypeFilter,
    pub status: SeoStatusFilter,
}

impl SeoQuery {
    pub fn matches(&self, item: &SeoItem) -> bool {
        let needle = self.search.to_lowercase();
        let text_match = needle.is_empty()
            || item.title.to_lowercase().contains(&needle)
            || item.slug.to_lowercase().contains(&needle);
        text_match && self.item_type.matches(item.item_type) && self.status.matches(item)
    }
}

pub fn filter_seo_items(items: &[SeoItem], query: &SeoQuery) -> Vec<SeoItem> {
    items
        .iter()
        .filter(|item| query.matches(item))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeoStats {
    pub total: usize,
    pub needs_attention: usize,
    pub complete: usize,
    /// Integer percentage of complete items, `0` when there are no items.
    pub coverage: u8,
}

impl SeoStats {
    pub fn from_items(items: &[SeoItem]) -> Self {
        let total = items.len();
        let needs_attention = items.iter().filter(|item| item.needs_attention()).count();
        let complete = total - needs_attention;
        Self {
            total,
            needs_attention,
            complete,
            coverage: coverage_percent(complete, total),
        }
    }
}

// Half rounds away from zero: 2/3 -> 67, 1/2 -> 50.
fn coverage_percent(complete: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let complete = complete as u128;
    let total = total as u128;
    let rounded = (200 * complete + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoReport {
    pub stats: SeoStats,
    pub items: Vec<SeoItem>,
}

impl SeoReport {
    /// Stats cover the whole collection; `items` is the filtered subset.
    pub fn build(pages: &[PageRecord], posts: &[PostRecord], query: &SeoQuery) -> Self {
        let all = build_seo_items(pages, posts);
        let stats = SeoStats::from_items(&all);
        let items = filter_seo_items(&all, query);
        Self { stats, items }
    }
}

/// Replacement SEO metadata for one page or post. Blank fields clear the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoMetadata {
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_image_path: Option<String>,
}

impl SeoMetadata {
    pub fn normalized(self) -> Result<Self, DomainError> {
        let seo_title = non_blank(self.seo_title);
        if let Some(title) = &seo_title {
            check_len("seo_title", title, SEO_TITLE_MAX_CHARS)?;
        }
        let seo_description = non_blank(self.seo_description);
        if let Some(description) = &seo_description {
            check_len("seo_description", description, SEO_DESCRIPTION_MAX_CHARS)?;
        }
        let seo_image_path = non_blank(self.seo_image_path);
        if let Some(path) = &seo_image_path {
            check_len("seo_image_path", path, SEO_IMAGE_PATH_MAX_CHARS)?;
        }

        Ok(Self {
            seo_title,
            seo_description,
            seo_image_path,
        })
    }
}
