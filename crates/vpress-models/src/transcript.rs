//! Transcript models.

use serde::{Deserialize, Serialize};

/// A single word with its timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptWord {
    /// Word text
    pub text: String,
    /// Start time in seconds
    pub start_seconds: f64,
    /// End time in seconds (>= start)
    pub end_seconds: f64,
}

impl TranscriptWord {
    /// A word is usable for subtitles only if its timestamps are finite,
    /// non-negative and not inverted, and its text is non-empty after trim.
    pub fn is_valid_cue(&self) -> bool {
        self.start_seconds.is_finite()
            && self.end_seconds.is_finite()
            && self.start_seconds >= 0.0
            && self.end_seconds >= self.start_seconds
            && !self.text.trim().is_empty()
    }
}

/// Full transcript of a recording.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    /// Full text, used for the music classifier prompt
    pub text: String,
    /// Time-coded words, used for subtitle cues
    pub words: Vec<TranscriptWord>,
}

impl Transcript {
    pub fn new(text: impl Into<String>, words: Vec<TranscriptWord>) -> Self {
        Self {
            text: text.into(),
            words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64) -> TranscriptWord {
        TranscriptWord {
            text: text.to_string(),
            start_seconds: start,
            end_seconds: end,
        }
    }

    #[test]
    fn test_valid_cue() {
        assert!(word("hello", 0.0, 0.4).is_valid_cue());
        assert!(word("x", 1.0, 1.0).is_valid_cue());
    }

    #[test]
    fn test_inverted_timestamps_rejected() {
        assert!(!word("hello", 1.0, 0.5).is_valid_cue());
    }

    #[test]
    fn test_blank_text_rejected() {
        assert!(!word("   ", 0.0, 0.4).is_valid_cue());
        assert!(!word("", 0.0, 0.4).is_valid_cue());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(!word("hello", f64::NAN, 0.4).is_valid_cue());
        assert!(!word("hello", 0.0, f64::INFINITY).is_valid_cue());
    }
}
