//! Pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for pipeline runs.
///
/// The fade length and the loudness/ducking defaults are configuration,
/// not protocol: requests carry their own ducking and LUFS targets, and
/// these values only fill the gaps.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory for per-request work directories
    pub work_dir: PathBuf,
    /// Timeout applied to every ffmpeg invocation
    pub ffmpeg_timeout_secs: u64,
    /// Fade-out length applied when the music bed is shorter than the voice
    pub fade_seconds: f64,
    /// Slack before the tempo stage engages, seconds
    pub duration_tolerance_seconds: f64,
    /// Validity window for presigned artifact URLs
    pub public_url_ttl: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            work_dir: std::env::temp_dir().join("vpress"),
            ffmpeg_timeout_secs: 300,
            fade_seconds: 3.0,
            duration_tolerance_seconds: 0.1,
            public_url_ttl: Duration::from_secs(24 * 3600),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            work_dir: std::env::var("PIPELINE_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            ffmpeg_timeout_secs: std::env::var("FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.ffmpeg_timeout_secs),
            fade_seconds: std::env::var("MUSIC_FADE_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.fade_seconds),
            duration_tolerance_seconds: defaults.duration_tolerance_seconds,
            public_url_ttl: Duration::from_secs(
                std::env::var("PUBLIC_URL_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(24 * 3600),
            ),
        }
    }
}
