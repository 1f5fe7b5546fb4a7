use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};

use nazim_site_api_types::SettingsPayload;

use crate::application::access::{Permission, Principal};
use crate::application::admin::UpdateSettingsCommand;
use crate::infra::http::{error::ApiError, extract::ApiJson};

use super::AdminState;

pub(super) async fn get_settings(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
) -> Result<Response, ApiError> {
    principal.require(Permission::SettingsRead)?;
    Ok(Json(state.settings.load().await?).into_response())
}

pub(super) async fn put_settings(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<SettingsPayload>,
) -> Result<Response, ApiError> {
    principal.require(Permission::SettingsWrite)?;
    let command = UpdateSettingsCommand {
        school_name: payload.school_name,
        school_slug: payload.school_slug,
        is_public: payload.is_public,
        default_language: payload.default_language,
        enabled_languages: payload.enabled_languages,
        theme: payload.theme,
        public_site_url: payload.public_site_url,
    };
    let settings = state.settings.update(principal.actor(), command).await?;
    Ok(Json(settings).into_response())
}
