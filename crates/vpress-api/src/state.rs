//! Application state.

use std::sync::Arc;
use std::time::Duration;

use vpress_catalog::{CatalogClient, MusicSelector, TrackClassifier};
use vpress_pipeline::{Pipeline, PipelineConfig};
use vpress_storage::ObjectStoreClient;
use vpress_transcribe::TranscribeClient;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub storage: Arc<ObjectStoreClient>,
    pub catalog: Arc<CatalogClient>,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let storage = ObjectStoreClient::from_env().await?;
        let catalog = CatalogClient::from_env()?;
        let transcriber = TranscribeClient::from_env()?;
        let classifier = TrackClassifier::from_env()?;
        let selector = MusicSelector::new(catalog.clone(), classifier);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let pipeline = Pipeline::new(
            PipelineConfig::from_env(),
            storage.clone(),
            transcriber,
            selector,
            http,
        );

        Ok(Self {
            config,
            storage: Arc::new(storage),
            catalog: Arc::new(catalog),
            pipeline: Arc::new(pipeline),
        })
    }
}
