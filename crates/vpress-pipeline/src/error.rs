//! Pipeline error types.

use thiserror::Error;

use vpress_media::MediaError;
use vpress_storage::StorageError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or unusable input; maps to HTTP 400.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A mandatory processing stage failed; maps to HTTP 500.
    #[error("{stage} failed: {source}")]
    Stage {
        stage: &'static str,
        source: MediaError,
    },

    /// Publishing the final artifact failed; maps to HTTP 500.
    #[error("Publish failed: {0}")]
    Publish(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn stage(stage: &'static str, source: MediaError) -> Self {
        Self::Stage { stage, source }
    }

    /// Whether this failure was caused by the client's request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::InvalidInput(_))
    }
}
