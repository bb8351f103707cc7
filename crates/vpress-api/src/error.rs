//! API error types.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use vpress_models::ErrorResponse;
use vpress_pipeline::PipelineError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Whether internal failure detail is hidden from response bodies.
/// Set once at startup from [`crate::config::ApiConfig::is_production`].
static REDACT_INTERNAL: AtomicBool = AtomicBool::new(false);

/// Configure internal-error redaction for all responses.
pub fn redact_internal_errors(enabled: bool) {
    REDACT_INTERNAL.store(enabled, Ordering::Relaxed);
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(#[from] vpress_storage::StorageError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] vpress_catalog::CatalogError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Pipeline(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Internal(_)
            | ApiError::Storage(_)
            | ApiError::Catalog(_)
            | ApiError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed to the client. Internal failure detail stays in
    /// the logs when redaction is on; client errors are always verbatim.
    fn public_detail(&self, redact: bool) -> String {
        match self {
            ApiError::Internal(_) | ApiError::Storage(_) | ApiError::Catalog(_) if redact => {
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.public_detail(REDACT_INTERNAL.load(Ordering::Relaxed));

        let body = ErrorResponse {
            success: false,
            error,
        };

        (status, Json(body)).into_response()
    }
}
