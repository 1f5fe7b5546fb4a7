use async_trait::async_trait;

use crate::application::repos::{RepoError, SettingsRepo};
use crate::domain::entities::SiteSettingsRecord;

use super::{PostgresRepositories, map_sqlx_error};

#[async_trait]
impl SettingsRepo for PostgresRepositories {
    async fn load_site_settings(&self) -> Result<SiteSettingsRecord, RepoError> {
        sqlx::query_as::<_, SiteSettingsRecord>(
            "SELECT school_name, school_slug, is_public, default_language, enabled_languages, \
             theme, public_site_url, updated_at \
             FROM site_settings WHERE id = 1",
        )
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn upsert_site_settings(&self, settings: SiteSettingsRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO site_settings (id, school_name, school_slug, is_public, default_language, \
             enabled_languages, theme, public_site_url, updated_at) \
             VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
             school_name = EXCLUDED.school_name, \
             school_slug = EXCLUDED.school_slug, \
             is_public = EXCLUDED.is_public, \
             default_language = EXCLUDED.default_language, \
             enabled_languages = EXCLUDED.enabled_languages, \
             theme = EXCLUDED.theme, \
             public_site_url = EXCLUDED.public_site_url, \
             updated_at = EXCLUDED.updated_at",
        )
        .bind(settings.school_name)
        .bind(settings.school_slug)
        .bind(settings.is_public)
        .bind(settings.default_language)
        .bind(settings.enabled_languages)
        .bind(settings.theme)
        .bind(settings.public_site_url)
        .bind(settings.updated_at)
        .execute(self.pool())
        .await
        .map(|_| ())
        .map_err(map_sqlx_error)
    }
}
