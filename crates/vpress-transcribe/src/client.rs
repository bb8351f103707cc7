//! Transcription service HTTP client.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use reqwest::Client;
use tracing::debug;

use vpress_models::Transcript;

use crate::error::{TranscribeError, TranscribeResult};
use crate::types::TranscriptionResponse;

/// Configuration for the transcription client.
#[derive(Debug, Clone)]
pub struct TranscribeConfig {
    /// Base URL of the transcription service
    pub base_url: String,
    /// API key sent as a bearer token, if the service requires one
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl TranscribeConfig {
    /// Create config from environment variables.
    ///
    /// Returns `None` when no service is configured; the pipeline treats
    /// that as "transcription not available" rather than an error.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("TRANSCRIBE_SERVICE_URL").ok()?;
        Some(Self {
            base_url,
            api_key: std::env::var("TRANSCRIBE_API_KEY").ok(),
            timeout: Duration::from_secs(
                std::env::var("TRANSCRIBE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        })
    }
}

/// Client for the word-level transcription service.
#[derive(Clone)]
pub struct TranscribeClient {
    http: Client,
    config: TranscribeConfig,
}

impl TranscribeClient {
    /// Create a new transcription client.
    pub fn new(config: TranscribeConfig) -> TranscribeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TranscribeError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables, if configured.
    pub fn from_env() -> TranscribeResult<Option<Self>> {
        match TranscribeConfig::from_env() {
            Some(config) => Ok(Some(Self::new(config)?)),
            None => Ok(None),
        }
    }

    /// Submit an audio file and return the word-level transcript.
    pub async fn transcribe(&self, audio_path: impl AsRef<Path>) -> TranscribeResult<Transcript> {
        let audio_path = audio_path.as_ref();
        let url = format!("{}/transcribe", self.config.base_url.trim_end_matches('/'));

        debug!("Transcribing {} via {}", audio_path.display(), url);

        let bytes = tokio::fs::read(audio_path).await?;
        let filename = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/octet-stream")
            .map_err(|e| TranscribeError::RequestFailed(e.to_string()))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("timestamps", "word");

        let mut request = self.http.post(&url).multipart(form);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscribeError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::RequestFailed(format!(
                "transcription service returned {}: {}",
                status, body
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::InvalidResponse(e.to_string()))?;

        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> TranscribeClient {
        TranscribeClient::new(TranscribeConfig {
            base_url,
            api_key: None,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    async fn write_temp_audio() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("voice.wav");
        tokio::fs::write(&path, b"RIFFfake").await.unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_transcribe_parses_words() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "hello world",
                "words": [
                    {"word": "hello", "start": 0.0, "end": 0.4},
                    {"word": "world", "start": 0.5, "end": 0.9}
                ]
            })))
            .mount(&server)
            .await;

        let (_dir, audio) = write_temp_audio().await;
        let transcript = test_client(server.uri()).transcribe(&audio).await.unwrap();

        assert_eq!(transcript.text, "hello world");
        assert_eq!(transcript.words.len(), 2);
    }

    #[tokio::test]
    async fn test_transcribe_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let (_dir, audio) = write_temp_audio().await;
        let err = test_client(server.uri()).transcribe(&audio).await.unwrap_err();
        assert!(matches!(err, TranscribeError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_transcribe_unreachable_service() {
        let (_dir, audio) = write_temp_audio().await;
        let err = test_client("http://127.0.0.1:1".to_string())
            .transcribe(&audio)
            .await
            .unwrap_err();
        assert!(matches!(err, TranscribeError::ServiceUnavailable(_)));
    }
}
