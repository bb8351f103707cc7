//! Processing request models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where the input audio comes from. Exactly one source per request.
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Raw bytes uploaded with the request.
    Upload { filename: String, bytes: Vec<u8> },
    /// Remote URL to download before processing.
    RemoteUrl(String),
}

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Wav,
    Mp3,
}

impl ExportFormat {
    /// File extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Wav => "wav",
            ExportFormat::Mp3 => "mp3",
        }
    }

    /// MIME type for the format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Wav => "audio/wav",
            ExportFormat::Mp3 => "audio/mpeg",
        }
    }
}

/// Parameters controlling one processing run.
///
/// Deserialized from the `params` multipart field. Every field has a
/// default so a client can send only what it cares about.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessingParams {
    /// Amplitude cutoff in dBFS. Samples below this are silence candidates.
    #[validate(range(max = 0.0, message = "thresholdDb must be <= 0"))]
    pub threshold_db: f64,

    /// Minimum silence run length in seconds.
    #[validate(range(exclusive_min = 0.0, message = "minDuration must be > 0"))]
    pub min_duration: f64,

    /// Silence kept at the start of each removed interval, seconds.
    #[validate(range(min = 0.0, message = "leftPadding must be >= 0"))]
    pub left_padding: f64,

    /// Silence kept at the end of each removed interval, seconds.
    #[validate(range(min = 0.0, message = "rightPadding must be >= 0"))]
    pub right_padding: f64,

    /// Target output duration in seconds. When set and shorter than the
    /// silence-removed duration, the audio is sped up to fit.
    #[validate(range(exclusive_min = 0.0, message = "targetDurationSeconds must be > 0"))]
    pub target_duration_seconds: Option<f64>,

    /// Generate an SRT subtitle file from the transcript.
    #[serde(rename = "transcribe")]
    pub transcribe_requested: bool,

    /// Output container format.
    pub export_format: ExportFormat,

    /// Mix a background-music track under the voice-over.
    pub add_music: bool,

    /// Let the classifier pick the track from the transcript.
    /// When true, `manual_track_id` is ignored.
    pub auto_select_music: bool,

    /// Explicit catalog track id. Takes precedence over auto-select
    /// only when `auto_select_music` is false.
    pub manual_track_id: Option<String>,

    /// Attenuation applied to the music bed, in dB (negative lowers it).
    pub music_ducking_db: f64,

    /// Loudness-normalization target for the music bed, in LUFS.
    pub music_target_lufs: f64,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            threshold_db: -40.0,
            min_duration: 0.5,
            left_padding: 0.0,
            right_padding: 0.0,
            target_duration_seconds: None,
            transcribe_requested: false,
            export_format: ExportFormat::Wav,
            add_music: false,
            auto_select_music: false,
            manual_track_id: None,
            music_ducking_db: -12.0,
            music_target_lufs: -14.0,
        }
    }
}

impl ProcessingParams {
    /// Whether a transcript is needed at all: either for subtitles or to
    /// feed the music classifier.
    pub fn wants_transcript(&self) -> bool {
        self.transcribe_requested || (self.add_music && self.auto_select_music)
    }

    /// The manual track id, honoring the auto-select precedence rule.
    pub fn effective_manual_track_id(&self) -> Option<&str> {
        if self.auto_select_music {
            None
        } else {
            self.manual_track_id.as_deref()
        }
    }
}
