//! Transcription service request/response types.

use serde::{Deserialize, Serialize};

use vpress_models::{Transcript, TranscriptWord};

/// Raw transcription response from the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Full transcript text
    pub text: String,
    /// Time-coded words
    #[serde(default)]
    pub words: Vec<WordTiming>,
}

/// One word with timing from the service.
///
/// Some deployments name the text field `word`, others `text`; accept both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordTiming {
    #[serde(alias = "text")]
    pub word: String,
    pub start: f64,
    pub end: f64,
}

impl From<TranscriptionResponse> for Transcript {
    fn from(resp: TranscriptionResponse) -> Self {
        let words = resp
            .words
            .into_iter()
            .map(|w| TranscriptWord {
                text: w.word,
                start_seconds: w.start,
                end_seconds: w.end,
            })
            .collect();
        Transcript::new(resp.text, words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_field_aliases() {
        let a: WordTiming = serde_json::from_str(r#"{"word":"hi","start":0.0,"end":0.3}"#).unwrap();
        let b: WordTiming = serde_json::from_str(r#"{"text":"hi","start":0.0,"end":0.3}"#).unwrap();
        assert_eq!(a.word, b.word);
    }

    #[test]
    fn test_response_to_transcript() {
        let resp = TranscriptionResponse {
            text: "hello world".to_string(),
            words: vec![
                WordTiming { word: "hello".to_string(), start: 0.0, end: 0.4 },
                WordTiming { word: "world".to_string(), start: 0.5, end: 0.9 },
            ],
        };
        let transcript: Transcript = resp.into();
        assert_eq!(transcript.text, "hello world");
        assert_eq!(transcript.words.len(), 2);
        assert!((transcript.words[1].start_seconds - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_response_without_words() {
        let resp: TranscriptionResponse =
            serde_json::from_str(r#"{"text":"just text"}"#).unwrap();
        assert!(resp.words.is_empty());
    }
}
