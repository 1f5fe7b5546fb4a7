use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::application::{access::Principal, error::ErrorReport};
use crate::infra::cache::{ResponseCache, should_store_response};

use super::error::ApiError;
use super::rate_limit::SubmissionRateLimiter;

const ANONYMOUS_CLIENT: &str = "anonymous";

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let ctx = RequestContext {
        request_id: request_id.clone(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();
    let actor = response
        .extensions()
        .get::<Principal>()
        .map(|principal| principal.actor().to_string());

    if status.is_client_error() || status.is_server_error() {
        let elapsed_ms = start.elapsed().as_millis();
        let report = response.extensions_mut().remove::<ErrorReport>();
        let (source, messages) = match report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "no diagnostic available".to_string());

        if status.is_server_error() {
            error!(
                target = "nazim_site::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                actor = actor.as_deref().unwrap_or(""),
                "request failed",
            );
        } else {
            warn!(
                target = "nazim_site::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                actor = actor.as_deref().unwrap_or(""),
                "client request error",
            );
        }
    }

    response
}

/// Serve public GETs from the response cache and fill it on misses.
pub async fn public_cache_layer(
    State(cache): State<ResponseCache>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() != Method::GET || !cache.is_enabled() {
        return next.run(request).await;
    }

    let key = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if let Some(hit) = cache.get(&key).await {
        metrics::counter!("nazim_public_cache_hit_total").increment(1);
        return hit;
    }
    metrics::counter!("nazim_public_cache_miss_total").increment(1);

    let response = next.run(request).await;
    if !should_store_response(&response) {
        return response;
    }

    match cache.store_response(&key, response).await {
        Ok(response) => response,
        Err((response, err)) => {
            warn!(
                target = "nazim_site::http::cache",
                key = %key,
                error = %err,
                "failed to cache public response"
            );
            response
        }
    }
}

/// Drop every cached public response after a successful admin mutation.
pub async fn invalidate_admin_writes(
    State(cache): State<ResponseCache>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mutating = !matches!(*request.method(), Method::GET | Method::HEAD);
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    if mutating && response.status().is_success() {
        cache.invalidate_all().await;
        debug!(
            target = "nazim_site::http::cache",
            path = %path,
            "public cache invalidated"
        );
    }
    response
}

/// Throttle anonymous submissions per client address and route.
pub async fn submission_rate_limit(
    State(limiter): State<SubmissionRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }

    let client = client_key(&request);
    let route = request.uri().path().to_string();

    match limiter.check(&client, &route) {
        Ok(_) => next.run(request).await,
        Err(retry_after) => {
            debug!(
                target = "nazim_site::http::rate_limit",
                client = %client,
                route = %route,
                retry_after,
                "submission throttled"
            );
            ApiError::rate_limited(retry_after)
        }
    }
}

fn client_key(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(ANONYMOUS_CLIENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_forwarded(value: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/contact").method(Method::POST);
        if let Some(value) = value {
            builder = builder.header("x-forwarded-for", value);
        }
        builder.body(Body::empty()).expect("request")
    }

    #[test]
    fn client_key_uses_first_forwarded_address() {
        let request = request_with_forwarded(Some("203.0.113.9, 10.0.0.1"));
        assert_eq!(client_key(&request), "203.0.113.9");
    }

    #[test]
    fn client_key_falls_back_to_anonymous() {
        assert_eq!(client_key(&request_with_forwarded(None)), "anonymous");
        assert_eq!(client_key(&request_with_forwarded(Some("  "))), "anonymous");
    }
}
