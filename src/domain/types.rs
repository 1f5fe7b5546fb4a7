//! Shared domain enumerations aligned with persisted database enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Publication state shared by pages, posts, announcements and catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "content_status", rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "inbox_status", rename_all = "snake_case")]
pub enum InboxStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl InboxStatus {
    pub const ALL: [InboxStatus; 4] = [
        InboxStatus::New,
        InboxStatus::Read,
        InboxStatus::Replied,
        InboxStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InboxStatus::New => "new",
            InboxStatus::Read => "read",
            InboxStatus::Replied => "replied",
            InboxStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for InboxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value `{0}`")]
pub struct UnknownVariant(pub String);

impl FromStr for InboxStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(InboxStatus::New),
            "read" => Ok(InboxStatus::Read),
            "replied" => Ok(InboxStatus::Replied),
            "archived" => Ok(InboxStatus::Archived),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "fatwa_question_status", rename_all = "snake_case")]
pub enum FatwaQuestionStatus {
    Pending,
    Reviewing,
    Answered,
    Rejected,
}

/// Kind of content an SEO item was projected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoItemType {
    Page,
    Post,
}

impl SeoItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            SeoItemType::Page => "page",
            SeoItemType::Post => "post",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbox_status_parses_case_insensitively() {
        assert_eq!("Archived".parse::<InboxStatus>(), Ok(InboxStatus::Archived));
        assert_eq!(" new ".parse::<InboxStatus>(), Ok(InboxStatus::New));
        assert!("spam".parse::<InboxStatus>().is_err());
    }

    #[test]
    fn unknown_status_names_the_rejected_value() {
        let err = "spam".parse::<InboxStatus>().expect_err("unknown status");
        assert_eq!(err, UnknownVariant("spam".into()));
        assert_eq!(err.to_string(), "unknown value `spam`");
    }

    #[test]
    fn inbox_status_round_trips_through_str() {
        for status in InboxStatus::ALL {
            assert_eq!(status.as_str().parse::<InboxStatus>(), Ok(status));
        }
    }
}
