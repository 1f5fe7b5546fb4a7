use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use nazim_site_api_types::EventPayload;

use crate::application::access::{Permission, Principal};
use crate::domain::events::EventDraft;
use crate::infra::http::{
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    parse_id,
};

use super::AdminState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct EventListQuery {
    search: Option<String>,
}

pub(super) async fn list_events(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiQuery(query): ApiQuery<EventListQuery>,
) -> Result<Response, ApiError> {
    principal.require(Permission::EventsRead)?;
    let events = state.events.list(query.search.as_deref()).await?;
    Ok(Json(events).into_response())
}

pub(super) async fn create_event(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<EventPayload>,
) -> Result<Response, ApiError> {
    principal.require(Permission::EventsWrite)?;
    let event = state
        .events
        .create(principal.actor(), draft_from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(event)).into_response())
}

pub(super) async fn get_event(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    principal.require(Permission::EventsRead)?;
    let id = parse_id(&id, "Event not found")?;
    Ok(Json(state.events.find(id).await?).into_response())
}

pub(super) async fn update_event(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<String>,
    ApiJson(payload): ApiJson<EventPayload>,
) -> Result<Response, ApiError> {
    principal.require(Permission::EventsWrite)?;
    let id = parse_id(&id, "Event not found")?;
    let event = state
        .events
        .update(principal.actor(), id, draft_from(payload))
        .await?;
    Ok(Json(event).into_response())
}

pub(super) async fn delete_event(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    principal.require(Permission::EventsWrite)?;
    let id = parse_id(&id, "Event not found")?;
    state.events.delete(principal.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn draft_from(payload: EventPayload) -> EventDraft {
    EventDraft {
        title: payload.title,
        location: payload.location,
        summary: payload.summary,
        starts_at: payload.starts_at,
        ends_at: payload.ends_at,
        is_public: payload.is_public,
    }
}
