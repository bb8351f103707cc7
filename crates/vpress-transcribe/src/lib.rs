//! Client for the external word-level transcription service.
//!
//! The service is optional: when unconfigured, subtitle generation and
//! automatic music selection degrade gracefully.

pub mod client;
pub mod error;
pub mod types;

pub use client::{TranscribeClient, TranscribeConfig};
pub use error::{TranscribeError, TranscribeResult};
pub use types::{TranscriptionResponse, WordTiming};
