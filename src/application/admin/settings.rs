use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use url::Url;

use crate::application::admin::audit::AdminAuditService;
use crate::application::repos::{RepoError, SettingsRepo};
use crate::domain::entities::SiteSettingsRecord;

#[derive(Debug, Error)]
pub enum AdminSettingsError {
    #[error("`{field}` {reason}")]
    ConstraintViolation {
        field: &'static str,
        reason: &'static str,
    },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct UpdateSettingsCommand {
    pub school_name: String,
    pub school_slug: String,
    pub is_public: bool,
    pub default_language: String,
    pub enabled_languages: Vec<String>,
    pub theme: Value,
    pub public_site_url: String,
}

#[derive(Clone)]
pub struct AdminSettingsService {
    repo: Arc<dyn SettingsRepo>,
    audit: AdminAuditService,
}

impl AdminSettingsService {
    pub fn new(repo: Arc<dyn SettingsRepo>, audit: AdminAuditService) -> Self {
        Self { repo, audit }
    }

    pub async fn load(&self) -> Result<SiteSettingsRecord, AdminSettingsError> {
        self.repo
            .load_site_settings()
            .await
            .map_err(AdminSettingsError::from)
    }

    pub async fn update(
        &self,
        actor: &str,
        command: UpdateSettingsCommand,
    ) -> Result<SiteSettingsRecord, AdminSettingsError> {
        let school_name = ensure_non_empty(&command.school_name, "school_name")?;
        let school_slug = ensure_non_empty(&command.school_slug, "school_slug")?;
        ensure_slug(&school_slug)?;

        let enabled_languages: Vec<String> = command
            .enabled_languages
            .iter()
            .map(|lang| lang.trim().to_ascii_lowercase())
            .filter(|lang| !lang.is_empty())
            .collect();
        if enabled_languages.is_empty() {
            return Err(violation("enabled_languages", "must not be empty"));
        }
        let default_language = command.default_language.trim().to_ascii_lowercase();
        if !enabled_languages.contains(&default_language) {
            return Err(violation(
                "default_language",
                "must be one of the enabled languages",
            ));
        }

        let public_site_url = ensure_non_empty(&command.public_site_url, "public_site_url")?;
        ensure_http_url(&public_site_url)?;

        let theme = match command.theme {
            Value::Null => Value::Object(Default::default()),
            Value::Object(map) => Value::Object(map),
            _ => return Err(violation("theme", "must be a JSON object")),
        };

        let record = SiteSettingsRecord {
            school_name,
            school_slug,
            is_public: command.is_public,
            default_language,
            enabled_languages,
            theme,
            public_site_url,
            updated_at: OffsetDateTime::now_utc(),
        };

        self.repo.upsert_site_settings(record).await?;
        let latest = self.repo.load_site_settings().await?;

        let snapshot = SettingsSnapshot::from(&latest);
        self.audit
            .record(actor, "settings.update", "settings", None, Some(&snapshot))
            .await?;

        Ok(latest)
    }
}

#[derive(Debug, Serialize)]
struct SettingsSnapshot<'a> {
    school_name: &'a str,
    school_slug: &'a str,
    is_public: bool,
    default_language: &'a str,
    enabled_languages: &'a [String],
    public_site_url: &'a str,
}

impl<'a> From<&'a SiteSettingsRecord> for SettingsSnapshot<'a> {
    fn from(record: &'a SiteSettingsRecord) -> Self {
        Self {
            school_name: &record.school_name,
            school_slug: &record.school_slug,
            is_public: record.is_public,
            default_language: &record.default_language,
            enabled_languages: &record.enabled_languages,
            public_site_url: &record.public_site_url,
        }
    }
}

fn violation(field: &'static str, reason: &'static str) -> AdminSettingsError {
    AdminSettingsError::ConstraintViolation { field, reason }
}

fn ensure_non_empty(value: &str, field: &'static str) -> Result<String, AdminSettingsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(violation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn ensure_slug(slug: &str) -> Result<(), AdminSettingsError> {
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(violation(
            "school_slug",
            "may only contain lowercase letters, digits and hyphens",
        ));
    }
    Ok(())
}

fn ensure_http_url(value: &str) -> Result<(), AdminSettingsError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(violation(
            "public_site_url",
            "must be an absolute http(s) URL",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_rules() {
        assert!(ensure_slug("al-noor-2").is_ok());
        assert!(ensure_slug("Al-Noor").is_err());
        assert!(ensure_slug("al noor").is_err());
    }

    #[test]
    fn public_site_url_must_be_absolute_http() {
        assert!(ensure_http_url("https://alnoor.example.org/").is_ok());
        assert!(ensure_http_url("http://localhost:3000").is_ok());
        assert!(ensure_http_url("ftp://alnoor.example.org").is_err());
        assert!(ensure_http_url("/relative").is_err());
    }
}
