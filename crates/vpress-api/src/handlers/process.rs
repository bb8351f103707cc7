//! Audio processing handler.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;
use validator::Validate;

use vpress_models::{InputSource, ProcessResponse, ProcessingParams};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Parsed `POST /api/process` form.
#[derive(Debug, Default)]
struct ProcessForm {
    file: Option<(String, Vec<u8>)>,
    url: Option<String>,
    params: Option<String>,
}

/// Process an audio recording end to end.
///
/// Multipart fields: `audioFile` (binary) or `audioUrl` (string), exactly
/// one of the two, plus an optional `params` JSON string.
pub async fn process_audio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<ProcessResponse>> {
    let form = read_form(multipart).await?;

    let params: ProcessingParams = match form.params {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| ApiError::bad_request(format!("malformed params JSON: {}", e)))?,
        None => ProcessingParams::default(),
    };
    params
        .validate()
        .map_err(|e| ApiError::bad_request(format!("invalid params: {}", e)))?;

    let input = match (form.file, form.url) {
        (Some((filename, bytes)), None) => {
            info!(filename = %filename, size = bytes.len(), "Processing uploaded file");
            InputSource::Upload { filename, bytes }
        }
        (None, Some(url)) => {
            info!(url = %url, "Processing remote audio");
            InputSource::RemoteUrl(url)
        }
        (Some(_), Some(_)) => {
            return Err(ApiError::bad_request(
                "provide either audioFile or audioUrl, not both",
            ))
        }
        (None, None) => {
            return Err(ApiError::bad_request(
                "either audioFile or audioUrl is required",
            ))
        }
    };

    let output = state.pipeline.run(input, &params).await?;

    Ok(Json(ProcessResponse::new(output.audio_url, output.srt_url)))
}

async fn read_form(mut multipart: Multipart) -> ApiResult<ProcessForm> {
    let mut form = ProcessForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audioFile" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read audioFile: {}", e)))?;
                form.file = Some((filename, bytes.to_vec()));
            }
            "audioUrl" => {
                let url = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read audioUrl: {}", e)))?;
                if !url.trim().is_empty() {
                    form.url = Some(url.trim().to_string());
                }
            }
            "params" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read params: {}", e)))?;
                form.params = Some(raw);
            }
            other => {
                return Err(ApiError::bad_request(format!(
                    "unexpected form field: {}",
                    other
                )))
            }
        }
    }

    Ok(form)
}
