//! Music track metadata.

use serde::{Deserialize, Serialize};

/// A track in the music catalog.
///
/// Immutable once fetched; the pipeline only references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicTrack {
    /// Catalog id
    pub id: String,

    /// Track title
    pub title: String,

    /// Short description of the track
    #[serde(default)]
    pub description: String,

    /// Mood tag (e.g. "uplifting", "calm")
    #[serde(default)]
    pub mood: String,

    /// Integrated loudness of the source file, if measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loudness_lufs: Option<f64>,

    /// Track duration in seconds, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    /// Where the audio file can be downloaded
    pub source_url: String,
}

impl MusicTrack {
    /// One catalog line for the classifier prompt: `"title — description [mood]"`.
    pub fn prompt_line(&self) -> String {
        format!("{} — {} [{}]", self.title, self.description, self.mood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_line() {
        let track = MusicTrack {
            id: "t1".to_string(),
            title: "Morning Drift".to_string(),
            description: "Soft ambient pads".to_string(),
            mood: "calm".to_string(),
            loudness_lufs: Some(-18.2),
            duration_seconds: Some(181.0),
            source_url: "https://cdn.example.com/t1.mp3".to_string(),
        };
        assert_eq!(track.prompt_line(), "Morning Drift — Soft ambient pads [calm]");
    }
}
