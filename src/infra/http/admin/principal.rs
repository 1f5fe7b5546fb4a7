use axum::{body::Body, http::Request, middleware::Next, response::IntoResponse, response::Response};
use tracing::debug;

use crate::application::access::Principal;
use crate::infra::http::error::ApiError;

pub const ACTOR_HEADER: &str = "x-website-actor";
pub const PERMISSIONS_HEADER: &str = "x-website-permissions";

/// Build the caller's [`Principal`] from the headers set by the upstream gateway.
///
/// Requests without an actor are rejected before reaching a handler.
pub async fn admin_principal(mut request: Request<Body>, next: Next) -> Response {
    let actor = request
        .headers()
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    let Some(actor) = actor else {
        return ApiError::unauthorized().into_response();
    };

    let permissions = request
        .headers()
        .get(PERMISSIONS_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let principal = Principal::from_header_values(actor, permissions);
    debug!(
        target = "nazim_site::http::admin",
        actor = principal.actor(),
        "admin principal resolved"
    );

    request.extensions_mut().insert(principal.clone());
    let mut response = next.run(request).await;
    response.extensions_mut().insert(principal);
    response
}
