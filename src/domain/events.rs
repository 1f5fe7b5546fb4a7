//! Validated input for creating and editing website events.

use time::OffsetDateTime;

use crate::domain::error::DomainError;

pub const TITLE_MAX_CHARS: usize = 200;
pub const LOCATION_MAX_CHARS: usize = 200;
pub const SUMMARY_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub starts_at: OffsetDateTime,
    pub ends_at: Option<OffsetDateTime>,
    pub is_public: bool,
}

impl EventDraft {
    /// Trim text fields, drop blank optionals and check the length and time limits.
    pub fn normalized(self) -> Result<Self, DomainError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("title", "must not be empty"));
        }
        check_len("title", &title, TITLE_MAX_CHARS)?;

        let location = non_blank(self.location);
        if let Some(location) = &location {
            check_len("location", location, LOCATION_MAX_CHARS)?;
        }
        let summary = non_blank(self.summary);
        if let Some(summary) = &summary {
            check_len("summary", summary, SUMMARY_MAX_CHARS)?;
        }

        if self.ends_at.is_some_and(|ends_at| ends_at < self.starts_at) {
            return Err(DomainError::validation(
                "ends_at",
                "must not be before starts_at",
            ));
        }

        Ok(Self {
            title,
            location,
            summary,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            is_public: self.is_public,
        })
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}
