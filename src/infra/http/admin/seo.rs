use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use nazim_site_api_types::SeoMetadataPayload;

use crate::application::access::{Permission, Principal};
use crate::domain::seo::{SeoMetadata, SeoQuery, SeoStatusFilter, SeoTypeFilter};
use crate::infra::http::{
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    parse_id,
};

use super::AdminState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct SeoParams {
    search: Option<String>,
    #[serde(rename = "type")]
    item_type: Option<String>,
    status: Option<String>,
}

pub(super) async fn seo_audit(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiQuery(params): ApiQuery<SeoParams>,
) -> Result<Response, ApiError> {
    let item_type = SeoTypeFilter::parse(params.item_type.as_deref().unwrap_or(""))
        .ok_or_else(|| ApiError::bad_request("Unknown SEO type filter", params.item_type.clone()))?;
    let status = SeoStatusFilter::parse(params.status.as_deref().unwrap_or(""))
        .ok_or_else(|| ApiError::bad_request("Unknown SEO status filter", params.status.clone()))?;

    let query = SeoQuery {
        search: params.search.unwrap_or_default(),
        item_type,
        status,
    };
    let report = state.seo.audit(&principal, &query).await?;
    Ok(Json(report).into_response())
}

pub(super) async fn update_page_seo(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<String>,
    ApiJson(payload): ApiJson<SeoMetadataPayload>,
) -> Result<Response, ApiError> {
    principal.require(Permission::PagesWrite)?;
    let id = parse_id(&id, "Page not found")?;
    let page = state
        .seo
        .update_page(principal.actor(), id, metadata_from(payload))
        .await?;
    Ok(Json(page).into_response())
}

pub(super) async fn update_post_seo(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<String>,
    ApiJson(payload): ApiJson<SeoMetadataPayload>,
) -> Result<Response, ApiError> {
    principal.require(Permission::PostsWrite)?;
    let id = parse_id(&id, "Post not found")?;
    let post = state
        .seo
        .update_post(principal.actor(), id, metadata_from(payload))
        .await?;
    Ok(Json(post).into_response())
}

fn metadata_from(payload: SeoMetadataPayload) -> SeoMetadata {
    SeoMetadata {
        seo_title: payload.seo_title,
        seo_description: payload.seo_description,
        seo_image_path: payload.seo_image_path,
    }
}
