//! Mapping of domain failures onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::shared::DomainError;

/// Error payload returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// A [`DomainError`] plus the message shown when its detail must stay internal.
#[derive(Debug)]
pub struct ApiError {
    error: DomainError,
    fallback: &'static str,
}

impl ApiError {
    pub fn new(error: DomainError, fallback: &'static str) -> Self {
        Self { error, fallback }
    }

    /// Adapter for `map_err`: `.map_err(ApiError::with("Failed to save address"))`
    pub fn with(fallback: &'static str) -> impl Fn(DomainError) -> Self {
        move |error| Self::new(error, fallback)
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            DomainError::Validation(_) | DomainError::Provider(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Configuration(_) | DomainError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match &self.error {
            DomainError::Validation(m)
            | DomainError::NotFound(m)
            | DomainError::Provider(m)
            | DomainError::Configuration(m) => m.clone(),
            DomainError::Unauthorized => "Unauthorized".to_string(),
            DomainError::Database(_) => self.fallback.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::new(error, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.error, "{}", self.fallback);
        }
        (status, Json(ErrorBody::new(self.message()))).into_response()
    }
}
