use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error returned by handlers and extractors. Gate failures are raised
/// before any handler body runs; none of these abort the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable credentials were presented.
    #[error("{0}")]
    AuthenticationRequired(String),

    /// Credentials were valid but the tier is insufficient.
    #[error("{0}")]
    AuthorizationDenied(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::AuthenticationRequired(m) => (StatusCode::UNAUTHORIZED, m),
            ApiError::AuthorizationDenied(m) => (StatusCode::FORBIDDEN, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
