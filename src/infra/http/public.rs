use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use nazim_site_api_types::{ContactSubmission, FatwaQuestionSubmission};

use crate::application::{
    public_site::{CourseQuery, PublicSiteService},
    repos::HealthRepo,
    sitemap::SitemapService,
};
use crate::infra::cache::ResponseCache;

use super::{
    db_health_response,
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::{log_responses, public_cache_layer, set_request_context, submission_rate_limit},
    parse_id,
    rate_limit::SubmissionRateLimiter,
};

pub const PUBLIC_PREFIX: &str = "/api/public/website";

#[derive(Clone)]
pub struct PublicState {
    pub site: Arc<PublicSiteService>,
    pub sitemap: Arc<SitemapService>,
    pub health: Arc<dyn HealthRepo>,
    pub cache: ResponseCache,
    pub limiter: SubmissionRateLimiter,
}

pub fn build_public_router(state: PublicState) -> Router {
    let reads = Router::new()
        .route("/site", get(site_summary))
        .route("/menus", get(menu_links))
        .route("/pages/{slug}", get(page_detail))
        .route("/posts", get(post_index))
        .route("/posts/{slug}", get(post_detail))
        .route("/announcements", get(announcement_index))
        .route("/announcements/{id}", get(announcement_detail))
        .route("/events", get(event_index))
        .route("/media", get(media_index))
        .route("/media/categories", get(media_categories))
        .route("/library", get(library_index))
        .route("/library/{id}", get(book_detail))
        .route("/courses", get(course_index))
        .route("/courses/{id}", get(course_detail))
        .route("/scholars", get(scholar_index))
        .route("/graduates", get(graduate_index))
        .route("/donations", get(donation_index))
        .route("/fatwas", get(fatwa_index))
        .route("/fatwas/categories", get(fatwa_categories))
        .route("/fatwas/{slug}", get(fatwa_detail))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots_txt))
        .layer(middleware::from_fn_with_state(
            state.cache.clone(),
            public_cache_layer,
        ));

    let submissions = Router::new()
        .route("/contact", post(submit_contact))
        .route("/fatwas/questions", post(submit_fatwa_question))
        .layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            submission_rate_limit,
        ));

    Router::new()
        .nest(PUBLIC_PREFIX, reads.merge(submissions))
        .route("/_health/db", get(public_health))
        .fallback(route_not_found)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageQuery {
    page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchQuery {
    search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MediaQuery {
    category: Option<String>,
    page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LibraryQuery {
    query: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CourseParams {
    category: Option<String>,
    level: Option<String>,
    search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GraduateQuery {
    year: Option<i32>,
    search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FatwaQuery {
    category: Option<String>,
    search: Option<String>,
}

async fn site_summary(State(state): State<PublicState>) -> Result<Response, ApiError> {
    Ok(Json(state.site.site_summary().await?).into_response())
}

async fn menu_links(State(state): State<PublicState>) -> Result<Response, ApiError> {
    Ok(Json(state.site.menus().await?).into_response())
}

async fn page_detail(
    State(state): State<PublicState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Response, ApiError> {
    Ok(Json(state.site.page(&slug).await?).into_response())
}

async fn post_index(
    State(state): State<PublicState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Response, ApiError> {
    Ok(Json(state.site.posts(query.page).await?).into_response())
}

async fn post_detail(
    State(state): State<PublicState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Response, ApiError> {
    Ok(Json(state.site.post(&slug).await?).into_response())
}

async fn announcement_index(
    State(state): State<PublicState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Response, ApiError> {
    Ok(Json(state.site.announcements(query.page).await?).into_response())
}

async fn announcement_detail(
    State(state): State<PublicState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id, "Announcement not found")?;
    Ok(Json(state.site.announcement(id).await?).into_response())
}

async fn event_index(
    State(state): State<PublicState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Response, ApiError> {
    Ok(Json(state.site.events(query.search.as_deref()).await?).into_response())
}

async fn media_index(
    State(state): State<PublicState>,
    ApiQuery(query): ApiQuery<MediaQuery>,
) -> Result<Response, ApiError> {
    let media = state
        .site
        .media(query.category.as_deref(), query.page)
        .await?;
    Ok(Json(media).into_response())
}

async fn media_categories(State(state): State<PublicState>) -> Result<Response, ApiError> {
    Ok(Json(state.site.media_categories().await?).into_response())
}

async fn library_index(
    State(state): State<PublicState>,
    ApiQuery(query): ApiQuery<LibraryQuery>,
) -> Result<Response, ApiError> {
    let books = state
        .site
        .library(query.query.as_deref(), query.category.as_deref())
        .await?;
    Ok(Json(books).into_response())
}

async fn book_detail(
    State(state): State<PublicState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id, "Book not found")?;
    Ok(Json(state.site.book(id).await?).into_response())
}

async fn course_index(
    State(state): State<PublicState>,
    ApiQuery(params): ApiQuery<CourseParams>,
) -> Result<Response, ApiError> {
    let query = CourseQuery {
        category: params.category,
        level: params.level,
        search: params.search,
    };
    Ok(Json(state.site.courses(&query).await?).into_response())
}

async fn course_detail(
    State(state): State<PublicState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id, "Course not found")?;
    Ok(Json(state.site.course(id).await?).into_response())
}

async fn scholar_index(
    State(state): State<PublicState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Response, ApiError> {
    Ok(Json(state.site.scholars(query.search.as_deref()).await?).into_response())
}

async fn graduate_index(
    State(state): State<PublicState>,
    ApiQuery(query): ApiQuery<GraduateQuery>,
) -> Result<Response, ApiError> {
    let graduates = state
        .site
        .graduates(query.year, query.search.as_deref())
        .await?;
    Ok(Json(graduates).into_response())
}

async fn donation_index(State(state): State<PublicState>) -> Result<Response, ApiError> {
    Ok(Json(state.site.donations().await?).into_response())
}

async fn fatwa_index(
    State(state): State<PublicState>,
    ApiQuery(query): ApiQuery<FatwaQuery>,
) -> Result<Response, ApiError> {
    let fatwas = state
        .site
        .fatwas(query.category.as_deref(), query.search.as_deref())
        .await?;
    Ok(Json(fatwas).into_response())
}

async fn fatwa_categories(State(state): State<PublicState>) -> Result<Response, ApiError> {
    Ok(Json(state.site.fatwa_categories().await?).into_response())
}

async fn fatwa_detail(
    State(state): State<PublicState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Response, ApiError> {
    Ok(Json(state.site.fatwa(&slug).await?).into_response())
}

async fn submit_contact(
    State(state): State<PublicState>,
    ApiJson(submission): ApiJson<ContactSubmission>,
) -> Result<Response, ApiError> {
    let message = state.site.submit_contact(submission).await?;
    Ok((StatusCode::CREATED, Json(message)).into_response())
}

async fn submit_fatwa_question(
    State(state): State<PublicState>,
    ApiJson(submission): ApiJson<FatwaQuestionSubmission>,
) -> Result<Response, ApiError> {
    let question = state.site.submit_fatwa_question(submission).await?;
    Ok((StatusCode::CREATED, Json(question)).into_response())
}

async fn sitemap_xml(State(state): State<PublicState>) -> Result<Response, ApiError> {
    let body = state.sitemap.sitemap_xml().await?;
    Ok(with_content_type(body, "application/xml; charset=utf-8"))
}

async fn robots_txt(State(state): State<PublicState>) -> Result<Response, ApiError> {
    let body = state.sitemap.robots_txt().await?;
    Ok(with_content_type(body, "text/plain; charset=utf-8"))
}

async fn public_health(State(state): State<PublicState>) -> Response {
    db_health_response(state.health.ping().await)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

fn with_content_type(body: String, content_type: &'static str) -> Response {
    let mut response = body.into_response();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
