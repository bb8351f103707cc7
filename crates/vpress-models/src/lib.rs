//! Shared data models for the VocalPress backend.
//!
//! This crate provides Serde-serializable types for:
//! - Processing requests and their parameter validation
//! - Music track metadata
//! - Transcripts and SRT subtitle building
//! - HTTP response payloads

pub mod request;
pub mod response;
pub mod srt;
pub mod track;
pub mod transcript;

// Re-export common types
pub use request::{ExportFormat, InputSource, ProcessingParams};
pub use response::{CatalogResponse, CatalogTrack, ErrorResponse, ProcessResponse, UploadCredentials};
pub use track::MusicTrack;
pub use transcript::{Transcript, TranscriptWord};
