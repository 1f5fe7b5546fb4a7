//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::types::{ContentStatus, FatwaQuestionStatus, InboxStatus};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PageRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub status: ContentStatus,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_image_path: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PostRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub status: ContentStatus,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_image_path: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub summary: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
    pub is_public: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CourseRecord {
    pub id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub level: Option<String>,
    pub instructor_name: Option<String>,
    pub cover_image_path: Option<String>,
    pub enrollment_cta: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub status: ContentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct BookRecord {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub cover_image_path: Option<String>,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub download_count: i64,
    pub is_featured: bool,
    pub sort_order: i32,
    pub status: ContentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ScholarRecord {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo_path: Option<String>,
    pub specializations: Vec<String>,
    pub contact_email: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub status: ContentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct GraduateRecord {
    pub id: Uuid,
    pub name: String,
    pub graduation_year: Option<i32>,
    pub program: Option<String>,
    pub photo_path: Option<String>,
    pub bio: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub status: ContentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Fundraising campaign. Amounts are kept in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct DonationRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_amount_minor: Option<i64>,
    pub current_amount_minor: i64,
    pub bank_details: Value,
    pub payment_links: Value,
    pub is_active: bool,
    pub sort_order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AnnouncementRecord {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub status: ContentStatus,
    pub is_pinned: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl AnnouncementRecord {
    /// Published, already live and not yet expired at `now`.
    pub fn is_visible_at(&self, now: OffsetDateTime) -> bool {
        self.status == ContentStatus::Published
            && self.published_at.is_none_or(|at| at <= now)
            && self.expires_at.is_none_or(|at| at >= now)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct MediaCategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub cover_image_path: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct MediaRecord {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_type: String,
    pub file_path: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FatwaCategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FatwaRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub category_id: Option<Uuid>,
    pub question_text: Option<String>,
    pub answer_text: Option<String>,
    pub status: ContentStatus,
    pub is_featured: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FatwaQuestionRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub category_id: Option<Uuid>,
    pub question_text: String,
    pub status: FatwaQuestionStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct InboxMessageRecord {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: InboxStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub replied_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SiteSettingsRecord {
    pub school_name: String,
    pub school_slug: String,
    pub is_public: bool,
    pub default_language: String,
    pub enabled_languages: Vec<String>,
    pub theme: Value,
    pub public_site_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A navigation link; children point at their parent through `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct MenuLinkRecord {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub label: String,
    pub url: String,
    pub is_visible: bool,
    pub sort_order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AuditLogRecord {
    pub id: Uuid,
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub payload_text: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
