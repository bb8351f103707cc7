//! HTTP response payloads.

use serde::{Deserialize, Serialize};

use crate::track::MusicTrack;

/// Successful processing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub success: bool,
    /// Public URL of the processed audio
    pub audio_url: String,
    /// Public URL of the SRT file, present only when subtitles were generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srt_url: Option<String>,
}

impl ProcessResponse {
    pub fn new(audio_url: impl Into<String>, srt_url: Option<String>) -> Self {
        Self {
            success: true,
            audio_url: audio_url.into(),
            srt_url,
        }
    }
}

/// Failure payload for any endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// One catalog entry as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    pub url: String,
    pub mood: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lufs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl From<MusicTrack> for CatalogTrack {
    fn from(track: MusicTrack) -> Self {
        Self {
            id: track.id,
            name: track.title,
            url: track.source_url,
            mood: track.mood,
            description: track.description,
            lufs: track.loudness_lufs,
            duration: track.duration_seconds,
        }
    }
}

/// Catalog listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub success: bool,
    pub tracks: Vec<CatalogTrack>,
}

impl CatalogResponse {
    pub fn new(tracks: Vec<CatalogTrack>) -> Self {
        Self {
            success: true,
            tracks,
        }
    }
}

/// Short-lived write credentials for a direct client upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCredentials {
    pub success: bool,
    /// Presigned PUT URL
    pub upload_url: String,
    /// Object key the credentials are bound to
    pub key: String,
    pub expires_in_seconds: u64,
}
