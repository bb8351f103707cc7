//! End-to-end audio processing pipeline.
//!
//! Takes one input (upload or remote URL) through silence removal, optional
//! tempo compression, optional transcription, optional background music and
//! optional format conversion, then publishes the result to object storage.

pub mod config;
pub mod error;
pub mod ledger;
pub mod orchestrator;
pub mod stages;
pub mod state;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use ledger::ResourceLedger;
pub use orchestrator::{Pipeline, PipelineOutput};
