mod admin;
pub mod error;
mod extract;
mod middleware;
mod public;
pub mod rate_limit;

pub use admin::{ACTOR_HEADER, ADMIN_PREFIX, AdminState, PERMISSIONS_HEADER, build_admin_router};
pub use error::ApiError;
pub use public::{PUBLIC_PREFIX, PublicState, build_public_router};
pub use rate_limit::SubmissionRateLimiter;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::error::ErrorReport;
use crate::application::repos::RepoError;

fn db_health_response(result: Result<(), RepoError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

/// Identifiers that do not parse cannot exist, so they answer 404.
fn parse_id(raw: &str, missing: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::not_found(missing))
}
