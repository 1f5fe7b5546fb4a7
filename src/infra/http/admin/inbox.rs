use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use nazim_site_api_types::InboxStatusUpdate;

use crate::application::access::{Permission, Principal};
use crate::application::pagination::{INBOX_PER_PAGE, PageRequest};
use crate::application::repos::InboxQueryFilter;
use crate::domain::types::InboxStatus;
use crate::infra::http::{
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    parse_id,
};

use super::AdminState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct InboxListQuery {
    status: Option<String>,
    search: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

pub(super) async fn list_messages(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiQuery(query): ApiQuery<InboxListQuery>,
) -> Result<Response, ApiError> {
    principal.require(Permission::InboxRead)?;

    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(parse_status(raw)?),
    };
    let filter = InboxQueryFilter {
        status,
        search: query.search.filter(|search| !search.trim().is_empty()),
    };
    let page = PageRequest::from_query(query.page, query.per_page, INBOX_PER_PAGE);

    Ok(Json(state.inbox.list(&filter, page).await?).into_response())
}

pub(super) async fn inbox_stats(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
) -> Result<Response, ApiError> {
    principal.require(Permission::InboxRead)?;
    Ok(Json(state.inbox.stats().await?).into_response())
}

/// Opening an unread message marks it read when the caller may write.
pub(super) async fn get_message(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    principal.require(Permission::InboxRead)?;
    let id = parse_id(&id, "Message not found")?;

    let message = if principal.can(Permission::InboxWrite) {
        state.inbox.view(principal.actor(), id).await?
    } else {
        state.inbox.find(id).await?
    };
    Ok(Json(message).into_response())
}

pub(super) async fn update_message(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<String>,
    ApiJson(payload): ApiJson<InboxStatusUpdate>,
) -> Result<Response, ApiError> {
    principal.require(Permission::InboxWrite)?;
    let id = parse_id(&id, "Message not found")?;
    let status = parse_status(&payload.status)?;

    let message = state
        .inbox
        .update_status(principal.actor(), id, status)
        .await?;
    Ok(Json(message).into_response())
}

pub(super) async fn delete_message(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    principal.require(Permission::InboxWrite)?;
    let id = parse_id(&id, "Message not found")?;
    state.inbox.delete(principal.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn parse_status(raw: &str) -> Result<InboxStatus, ApiError> {
    raw.parse::<InboxStatus>()
        .map_err(|err| ApiError::bad_request("Unknown inbox status", Some(err.to_string())))
}
