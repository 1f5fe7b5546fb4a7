use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::access::{Permission, Principal};
use crate::application::pagination::{AUDIT_PER_PAGE, PageRequest};
use crate::application::repos::AuditQueryFilter;
use crate::infra::http::{error::ApiError, extract::ApiQuery};

use super::AdminState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AuditLogQuery {
    actor: Option<String>,
    action: Option<String>,
    entity_type: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

pub(super) async fn list_audit_logs(
    State(state): State<AdminState>,
    Extension(principal): Extension<Principal>,
    ApiQuery(query): ApiQuery<AuditLogQuery>,
) -> Result<Response, ApiError> {
    principal.require(Permission::AuditRead)?;

    let filter = AuditQueryFilter {
        actor: non_empty(query.actor),
        action: non_empty(query.action),
        entity_type: non_empty(query.entity_type),
    };
    let page = PageRequest::from_query(query.page, query.per_page, AUDIT_PER_PAGE);

    Ok(Json(state.audit.list(&filter, page).await?).into_response())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
