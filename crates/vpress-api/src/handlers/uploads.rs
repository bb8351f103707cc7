//! Direct-upload credential handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use vpress_models::UploadCredentials;
use vpress_storage::unique_upload_key;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for `POST /api/uploads`.
#[derive(Debug, Deserialize, Validate)]
pub struct UploadRequest {
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
}

/// Issue a presigned PUT URL for a direct client upload.
pub async fn create_upload_url(
    State(state): State<AppState>,
    Json(body): Json<UploadRequest>,
) -> ApiResult<Json<UploadCredentials>> {
    body.validate()
        .map_err(|e| ApiError::bad_request(format!("invalid upload request: {}", e)))?;

    let key = unique_upload_key(&body.filename);
    let ttl = state.config.upload_url_ttl;
    let upload_url = state.storage.presigned_put_url(&key, ttl).await?;

    Ok(Json(UploadCredentials {
        success: true,
        upload_url,
        key,
        expires_in_seconds: ttl.as_secs(),
    }))
}
