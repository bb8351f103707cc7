//! Axum HTTP API server.
//!
//! This crate provides:
//! - The `/api/process` endpoint running the full audio pipeline
//! - Music catalog listing and direct-upload credentials
//! - Static API key auth and security-header middleware

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
