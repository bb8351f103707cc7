//! Gemini classifier client for track selection.
//!
//! One classification call per request: the transcript and the numbered
//! catalog go in, and the model is instructed to answer with exactly one
//! existing track title.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use vpress_models::MusicTrack;

use crate::error::{CatalogError, CatalogResult};

/// Gemini API client used as the track classifier.
#[derive(Clone)]
pub struct TrackClassifier {
    api_key: String,
    http: Client,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl TrackClassifier {
    /// Create a new classifier client.
    pub fn new(api_key: impl Into<String>) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(CatalogError::Network)?;
        Ok(Self {
            api_key: api_key.into(),
            http,
        })
    }

    /// Create from environment variables, if configured.
    pub fn from_env() -> CatalogResult<Option<Self>> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) => Ok(Some(Self::new(key)?)),
            Err(_) => Ok(None),
        }
    }

    /// Run one classification call and return the model's raw reply,
    /// trimmed and stripped of markdown fences.
    pub async fn classify(&self, prompt: &str) -> CatalogResult<String> {
        let models = ["gemini-2.5-flash", "gemini-2.5-flash-lite"];

        let mut last_error = None;

        for model in &models {
            info!("Attempting classification with model: {}", model);
            match self.call_gemini_api(model, prompt).await {
                Ok(reply) => return Ok(reply),
                Err(e) => {
                    warn!("Classification with {} failed: {:?}", model, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| CatalogError::RequestFailed("All Gemini models failed".to_string())))
    }

    async fn call_gemini_api(&self, model: &str, prompt: &str) -> CatalogResult<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CatalogError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::RequestFailed(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| CatalogError::InvalidResponse("No content in Gemini response".to_string()))?;

        Ok(strip_markdown_fences(text).to_string())
    }
}

/// Strip a markdown code fence the model sometimes wraps replies in.
fn strip_markdown_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Build the classification prompt from the transcript and the catalog.
pub fn build_selection_prompt(transcript: &str, tracks: &[MusicTrack]) -> String {
    let mut prompt = String::from(
        "You choose background music for voice-over recordings.\n\
         Below is the transcript of a recording, followed by the available tracks.\n\n\
         TRANSCRIPT:\n",
    );
    prompt.push_str(transcript);
    prompt.push_str("\n\nAVAILABLE TRACKS:\n");

    for (i, track) in tracks.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, track.prompt_line()));
    }

    prompt.push_str(
        "\nAnswer with the exact title of the single best-fitting track from the list above.\n\
         Return ONLY the title, with no numbering, punctuation or explanation.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, description: &str, mood: &str) -> MusicTrack {
        MusicTrack {
            id: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            description: description.to_string(),
            mood: mood.to_string(),
            loudness_lufs: None,
            duration_seconds: None,
            source_url: String::new(),
        }
    }

    #[test]
    fn test_new_builds_client() {
        assert!(TrackClassifier::new("test-key").is_ok());
    }

    #[test]
    fn test_strip_markdown_fences() {
        assert_eq!(strip_markdown_fences("Morning Drift"), "Morning Drift");
        assert_eq!(strip_markdown_fences("```\nMorning Drift\n```"), "Morning Drift");
        assert_eq!(strip_markdown_fences("  Morning Drift  "), "Morning Drift");
    }

    #[test]
    fn test_build_selection_prompt() {
        let tracks = vec![
            track("Morning Drift", "Soft ambient pads", "calm"),
            track("Night Loop", "Lo-fi beat", "chill"),
        ];
        let prompt = build_selection_prompt("welcome to the show", &tracks);

        assert!(prompt.contains("welcome to the show"));
        assert!(prompt.contains("1. Morning Drift — Soft ambient pads [calm]"));
        assert!(prompt.contains("2. Night Loop — Lo-fi beat [chill]"));
        assert!(prompt.contains("exact title"));
    }
}
