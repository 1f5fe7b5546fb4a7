mod audit;
mod events;
mod inbox;
mod principal;
mod seo;
mod settings;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    middleware,
    response::Response,
    routing::{get, put},
};

use crate::application::admin::{
    AdminAuditService, AdminEventService, AdminInboxService, AdminSeoService, AdminSettingsService,
};
use crate::application::repos::HealthRepo;
use crate::infra::cache::ResponseCache;

use super::{
    db_health_response,
    error::ApiError,
    middleware::{invalidate_admin_writes, log_responses, set_request_context},
};

pub use principal::{ACTOR_HEADER, PERMISSIONS_HEADER};

pub const ADMIN_PREFIX: &str = "/api/admin/website";

#[derive(Clone)]
pub struct AdminState {
    pub events: Arc<AdminEventService>,
    pub inbox: Arc<AdminInboxService>,
    pub seo: Arc<AdminSeoService>,
    pub settings: Arc<AdminSettingsService>,
    pub audit: Arc<AdminAuditService>,
    pub health: Arc<dyn HealthRepo>,
    /// Public response cache, cleared after every successful mutation.
    pub cache: ResponseCache,
}

pub fn build_admin_router(state: AdminState) -> Router {
    let api = Router::new()
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/inbox", get(inbox::list_messages))
        .route("/inbox/stats", get(inbox::inbox_stats))
        .route(
            "/inbox/{id}",
            get(inbox::get_message)
                .put(inbox::update_message)
                .delete(inbox::delete_message),
        )
        .route("/seo", get(seo::seo_audit))
        .route("/pages/{id}/seo", put(seo::update_page_seo))
        .route("/posts/{id}/seo", put(seo::update_post_seo))
        .route("/audit-logs", get(audit::list_audit_logs))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::put_settings),
        )
        .layer(middleware::from_fn(principal::admin_principal));

    Router::new()
        .nest(ADMIN_PREFIX, api)
        .route("/_health/db", get(admin_health))
        .fallback(route_not_found)
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            state.cache,
            invalidate_admin_writes,
        ))
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn admin_health(State(state): State<AdminState>) -> Response {
    db_health_response(state.health.ping().await)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
