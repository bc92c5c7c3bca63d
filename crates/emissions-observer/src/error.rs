//! Error types for the dashboard API server.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use emissions_core::QueryError;

/// Errors that can occur in the dashboard API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An invalid query or state was provided.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The dashboard page could not be rendered.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PathRejection> for ObserverError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

// Covers malformed JSON, a wrong content type, and bodies that do not
// match the target type (e.g. an unknown event `type`).
impl From<JsonRejection> for ObserverError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl From<QueryError> for ObserverError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NoData { .. } => Self::NotFound(err.to_string()),
            QueryError::YearOutOfRange { .. } | QueryError::UnknownEntity(_) => {
                Self::InvalidQuery(err.to_string())
            }
        }
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
