//! Transcription client error types.

use thiserror::Error;

pub type TranscribeResult<T> = Result<T, TranscribeError>;

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("Transcription service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
