//! Offset pagination helpers shared by services and repositories.

pub use nazim_site_api_types::{ListPayload, Paginated, last_page};

pub const MAX_PER_PAGE: u32 = 100;

pub const POSTS_PER_PAGE: u32 = 9;
pub const ANNOUNCEMENTS_PER_PAGE: u32 = 9;
pub const MEDIA_PER_PAGE: u32 = 12;
pub const INBOX_PER_PAGE: u32 = 20;
pub const AUDIT_PER_PAGE: u32 = 50;

/// A validated page request. `page` starts at one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Build from optional query parameters, falling back to page one and `default_per_page`.
    pub fn from_query(page: Option<u32>, per_page: Option<u32>, default_per_page: u32) -> Self {
        Self::new(page.unwrap_or(1), per_page.unwrap_or(default_per_page))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// Wrap one page of rows together with the total row count.
    pub fn envelope<T>(&self, data: Vec<T>, total: u64) -> Paginated<T> {
        Paginated::new(data, self.page, self.per_page, total)
    }
}

/// Slice an in-memory collection into the requested page.
pub fn paginate_items<T>(items: Vec<T>, request: PageRequest) -> Paginated<T> {
    let total = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let data = items
        .into_iter()
        .skip(offset)
        .take(request.per_page() as usize)
        .collect();
    request.envelope(data, total)
}
