use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::header::ALLOW;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use thesaurus_core::error::CoreError;
use thesaurus_db::service::ServiceError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `thesaurus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A path segment or query string that could not be deserialized.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The route exists but does not accept this method.
    #[error("Method \"{0}\" not allowed.")]
    MethodNotAllowed(Method),
}

/// Methods every thesaurus route answers, sent in the `Allow` header of a 405.
const ALLOWED_METHODS: &str = "GET, HEAD";

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(core) => AppError::Core(core),
            ServiceError::Database(db) => AppError::Database(db),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (
                    StatusCode::NOT_FOUND,
                    error_body("NOT_FOUND", core.to_string()),
                ),
                // Rejected query parameters are reported as a bare list of messages.
                CoreError::InvalidParameter(_) => {
                    (StatusCode::BAD_REQUEST, json!([core.to_string()]))
                }
                CoreError::MissingParameter(_) => {
                    tracing::error!(error = %core, "Filter operation called without parameters");
                    internal_error()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                error_body("BAD_REQUEST", msg.clone()),
            ),
            AppError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                error_body("METHOD_NOT_ALLOWED", self.to_string()),
            ),
        };

        let mut response = (status, axum::Json(body)).into_response();
        if matches!(self, AppError::MethodNotAllowed(_)) {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}

fn error_body(code: &str, message: String) -> Value {
    json!({
        "error": message,
        "code": code,
    })
}

fn internal_error() -> (StatusCode, Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_body("INTERNAL_ERROR", "An internal error occurred".to_string()),
    )
}

/// Classify a sqlx error into an HTTP status and JSON body.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, Value) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            error_body("NOT_FOUND", "Resource not found".to_string()),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}
