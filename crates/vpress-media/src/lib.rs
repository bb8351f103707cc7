//! FFmpeg CLI wrapper for audio processing.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with multiple inputs
//! - A runner with timeout and stderr capture
//! - FFprobe audio information
//! - Audio filter-graph builders (silence removal, tempo, loudness, fade, mix)
//! - Pure-function silence detection over raw samples
//! - Remote file download

pub mod command;
pub mod download;
pub mod error;
pub mod filters;
pub mod probe;
pub mod silence;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use download::download_to_file;
pub use error::{MediaError, MediaResult};
pub use probe::{get_duration, probe_audio, AudioInfo};
pub use silence::{detect_silence, SilenceInterval, SilenceParams};
