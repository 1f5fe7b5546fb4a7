use axum::Json;
use axum::http::{HeaderValue, StatusCode, header::RETRY_AFTER};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::access::AccessError;
use crate::application::admin::{
    AdminEventError, AdminInboxError, AdminSeoError, AdminSettingsError,
};
use crate::application::error::ErrorReport;
use crate::application::public_site::PublicSiteError;
use crate::application::repos::RepoError;
use crate::application::sitemap::SitemapError;
use crate::domain::error::DomainError;
use crate::domain::types::SeoItemType;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const FORBIDDEN: &str = "forbidden";
    pub const NOT_FOUND: &str = "not_found";
    pub const RATE_LIMITED: &str = "rate_limited";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const DUPLICATE: &str = "duplicate";
    pub const DB_TIMEOUT: &str = "db_timeout";
    pub const REPO: &str = "repo_error";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// JSON error returned by both routers.
///
/// The diagnostic chain travels separately as an [`ErrorReport`] so the
/// logging middleware can see causes the client never does.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
    chain: Vec<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
            chain: Vec::new(),
        }
    }

    pub fn bad_request(message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, hint)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            codes::UNAUTHORIZED,
            "Actor header required",
            None,
        )
    }

    pub fn forbidden(hint: Option<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            codes::FORBIDDEN,
            "Missing required permission",
            hint,
        )
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn invalid_input(hint: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            codes::INVALID_INPUT,
            "Invalid input",
            Some(hint.into()),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    fn with_chain(mut self, error: &dyn std::error::Error) -> Self {
        self.chain = ErrorReport::from_error("infra::http", self.status, error).messages;
        self
    }

    pub fn rate_limited(retry_after: u64) -> Response {
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: codes::RATE_LIMITED.to_string(),
                message: "Too many submissions".to_string(),
                hint: Some(format!("Retry after {retry_after} seconds")),
            },
        };
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert(RETRY_AFTER, value);
        }
        metrics::counter!("nazim_rate_limited_total").increment(1);
        ErrorReport::from_message(
            "infra::http::rate_limit",
            StatusCode::TOO_MANY_REQUESTS,
            format!("rate_limited: retry_after={retry_after}"),
        )
        .attach(&mut response);
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut messages = vec![format!(
            "{}: {}",
            self.code,
            self.hint.as_deref().unwrap_or(self.message)
        )];
        messages.extend(self.chain);

        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport {
            source: "infra::http",
            status: self.status,
            messages,
        }
        .attach(&mut response);
        response
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        let mapped = match &err {
            RepoError::NotFound => ApiError::not_found("Resource not found"),
            RepoError::Duplicate { constraint } => ApiError::new(
                StatusCode::CONFLICT,
                codes::DUPLICATE,
                "Duplicate record",
                Some(constraint.clone()),
            ),
            RepoError::InvalidInput { message } | RepoError::Integrity { message } => {
                ApiError::invalid_input(message.clone())
            }
            RepoError::Timeout => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                codes::DB_TIMEOUT,
                "Database timeout",
                None,
            ),
            RepoError::Persistence(_) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::REPO,
                "Persistence error",
                None,
            ),
        };
        mapped.with_chain(&err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { .. } => ApiError::not_found("Resource not found"),
            DomainError::Validation { .. } => ApiError::invalid_input(err.to_string()),
            DomainError::Invariant { .. } => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::REPO,
                "Invariant violated",
                None,
            )
            .with_chain(&err),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Forbidden(permission) => {
                ApiError::forbidden(Some(format!("requires `{permission}`")))
            }
            AccessError::UnknownPermission(name) => {
                ApiError::bad_request("Unknown permission", Some(name))
            }
        }
    }
}

impl From<PublicSiteError> for ApiError {
    fn from(err: PublicSiteError) -> Self {
        match err {
            PublicSiteError::NotFound(_) => ApiError::not_found("Resource not found"),
            PublicSiteError::Validation(err) => err.into(),
            PublicSiteError::Repo(err) => err.into(),
        }
    }
}

impl From<AdminEventError> for ApiError {
    fn from(err: AdminEventError) -> Self {
        match err {
            AdminEventError::Validation(err) => err.into(),
            AdminEventError::NotFound(_) => ApiError::not_found("Event not found"),
            AdminEventError::Repo(err) => err.into(),
        }
    }
}

impl From<AdminInboxError> for ApiError {
    fn from(err: AdminInboxError) -> Self {
        match err {
            AdminInboxError::NotFound(_) => ApiError::not_found("Message not found"),
            AdminInboxError::Repo(err) => err.into(),
        }
    }
}

impl From<AdminSeoError> for ApiError {
    fn from(err: AdminSeoError) -> Self {
        match err {
            AdminSeoError::Validation(err) => err.into(),
            AdminSeoError::NotFound(SeoItemType::Page, _) => ApiError::not_found("Page not found"),
            AdminSeoError::NotFound(SeoItemType::Post, _) => ApiError::not_found("Post not found"),
            AdminSeoError::Repo(err) => err.into(),
        }
    }
}

impl From<AdminSettingsError> for ApiError {
    fn from(err: AdminSettingsError) -> Self {
        match err {
            AdminSettingsError::ConstraintViolation { .. } => {
                ApiError::invalid_input(err.to_string())
            }
            AdminSettingsError::Repo(err) => err.into(),
        }
    }
}

impl From<SitemapError> for ApiError {
    fn from(err: SitemapError) -> Self {
        match err {
            SitemapError::Settings(err) | SitemapError::Content(err) => err.into(),
        }
    }
}
