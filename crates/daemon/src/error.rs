use axum::response::IntoResponse;
use axum::Json;
use employee_core::api::ApiEnvelope;
use thiserror::Error;

use crate::db::StoreError;

/// Operation outcome errors, mapped one-to-one onto response envelopes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    NotFound(String),
    #[error("employee id sequence unavailable")]
    CounterUnavailable,
    #[error("store unavailable")]
    StoreUnavailable,
    #[error("unexpected error")]
    Unexpected,
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(field) => Self::Duplicate(format!("Employee {field} already exists")),
            StoreError::CounterMissing => Self::CounterUnavailable,
            StoreError::Db(_) | StoreError::MissingDocument(_) => Self::StoreUnavailable,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // Store failures are surfaced generically; the cause stays in the logs.
        let (status, message) = match &self {
            ApiError::Validation(m) => (axum::http::StatusCode::BAD_REQUEST, m.clone()),
            ApiError::Duplicate(m) => (axum::http::StatusCode::CONFLICT, m.clone()),
            ApiError::NotFound(m) => (axum::http::StatusCode::NOT_FOUND, m.clone()),
            ApiError::CounterUnavailable | ApiError::StoreUnavailable => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Database error occurred. Please try again later.".to_string(),
            ),
            ApiError::Unexpected => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred. Please try again later.".to_string(),
            ),
        };

        let envelope = ApiEnvelope::<()>::new(message, None, status.as_u16());
        (status, Json(envelope)).into_response()
    }
}
