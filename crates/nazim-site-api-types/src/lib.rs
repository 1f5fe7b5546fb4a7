//! Request and response shapes shared by the Nazim website API and its clients.
//!
//! List endpoints answer either with a bare JSON array or with the paginated
//! envelope `{data, current_page, last_page, per_page, total}`. Clients should
//! deserialize into [`ListPayload`] and call [`ListPayload::into_items`] once at
//! the boundary instead of probing the shape at every call site.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Paginated envelope returned by paged list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Build an envelope; `last_page` is derived from `total` and never drops below one.
    pub fn new(data: Vec<T>, current_page: u32, per_page: u32, total: u64) -> Self {
        let per_page = per_page.max(1);
        Self {
            data,
            current_page: current_page.max(1),
            last_page: last_page(total, per_page),
            per_page,
            total,
        }
    }

    pub fn empty(per_page: u32) -> Self {
        Self::new(Vec::new(), 1, per_page, 0)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

/// Number of the last page for `total` items split in pages of `per_page`.
pub fn last_page(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Either response shape a list endpoint may produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paginated(Paginated<T>),
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Paginated(page) => page.data,
            ListPayload::Bare(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ListPayload::Paginated(page) => page.data.len(),
            ListPayload::Bare(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> From<Vec<T>> for ListPayload<T> {
    fn from(items: Vec<T>) -> Self {
        ListPayload::Bare(items)
    }
}

impl<T> From<Paginated<T>> for ListPayload<T> {
    fn from(page: Paginated<T>) -> Self {
        ListPayload::Paginated(page)
    }
}

/// Public contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Question submitted to the fatwa desk from the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatwaQuestionSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub category_id: Option<uuid::Uuid>,
    pub question_text: String,
}

/// Create/update body for website events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPayload {
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

/// Status change for an inbox message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxStatusUpdate {
    pub status: String,
}

/// SEO metadata for a page or post. Omitted or blank fields clear the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoMetadataPayload {
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub seo_image_path: Option<String>,
}

/// Full replacement of the website settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsPayload {
    pub school_name: String,
    pub school_slug: String,
    pub is_public: bool,
    pub default_language: String,
    pub enabled_languages: Vec<String>,
    #[serde(default)]
    pub theme: serde_json::Value,
    pub public_site_url: String,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_never_drops_below_one() {
        assert_eq!(last_page(0, 9), 1);
        assert_eq!(last_page(9, 9), 1);
        assert_eq!(last_page(10, 9), 2);
        assert_eq!(last_page(27, 0), 27);
    }

    #[test]
    fn list_payload_accepts_both_shapes() {
        let bare: ListPayload<u32> = serde_json::from_str("[1, 2, 3]").expect("bare array");
        assert_eq!(bare.into_items(), vec![1, 2, 3]);

        let envelope: ListPayload<u32> = serde_json::from_str(
            r#"{"data":[4,5],"current_page":2,"last_page":2,"per_page":2,"total":4}"#,
        )
        .expect("envelope");
        assert_eq!(envelope.len(), 2);
        assert_eq!(envelope.into_items(), vec![4, 5]);
    }

    #[test]
    fn event_payload_defaults_to_public() {
        let payload: EventPayload = serde_json::from_str(
            r#"{"title":"Graduation","starts_at":"2026-05-01T09:00:00Z"}"#,
        )
        .expect("event payload");
        assert!(payload.is_public);
        assert!(payload.ends_at.is_none());
        assert!(payload.location.is_none());
    }

    #[test]
    fn paginated_map_keeps_page_metadata() {
        let page = Paginated::new(vec![1, 2], 2, 2, 5).map(|n| n * 10);
        assert_eq!(page.data, vec![10, 20]);
        assert_eq!(page.last_page, 3);
        assert!(page.has_next());
    }
}
