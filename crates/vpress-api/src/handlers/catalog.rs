//! Music catalog handler.

use axum::extract::State;
use axum::Json;

use vpress_models::{CatalogResponse, CatalogTrack};

use crate::error::ApiResult;
use crate::state::AppState;

/// List the available background music tracks.
pub async fn list_catalog(State(state): State<AppState>) -> ApiResult<Json<CatalogResponse>> {
    let tracks = state.catalog.list_tracks().await?;
    let tracks: Vec<CatalogTrack> = tracks.into_iter().map(CatalogTrack::from).collect();
    Ok(Json(CatalogResponse::new(tracks)))
}
