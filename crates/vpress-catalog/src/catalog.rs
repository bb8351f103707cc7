//! Music catalog HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use vpress_models::MusicTrack;

use crate::error::{CatalogError, CatalogResult};

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the track record store
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> CatalogResult<Self> {
        let base_url = std::env::var("MUSIC_CATALOG_URL")
            .map_err(|_| CatalogError::ServiceUnavailable("MUSIC_CATALOG_URL not set".to_string()))?;
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(
                std::env::var("MUSIC_CATALOG_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        })
    }
}

/// Catalog list response from the record store.
#[derive(Debug, Deserialize)]
struct CatalogListResponse {
    tracks: Vec<MusicTrack>,
}

/// Read-only client for the music track record store.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new catalog client.
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CatalogError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> CatalogResult<Self> {
        Self::new(CatalogConfig::from_env()?)
    }

    /// Fetch the full track list.
    pub async fn list_tracks(&self) -> CatalogResult<Vec<MusicTrack>> {
        let url = format!("{}/tracks", self.config.base_url.trim_end_matches('/'));
        debug!("Fetching music catalog from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::RequestFailed(format!(
                "catalog returned HTTP {}",
                response.status()
            )));
        }

        let parsed: CatalogListResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        Ok(parsed.tracks)
    }
}
