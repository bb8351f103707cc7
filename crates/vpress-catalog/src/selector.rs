//! Track selection policy.
//!
//! Manual id wins. Otherwise, with auto-select on, one classification call
//! decides; the reply is accepted only on an exact catalog-title match.
//! Anything else (near-miss titles, empty catalog, missing transcript,
//! unconfigured classifier) skips music for the request. No retry, no
//! fuzzy matching.

use tracing::{info, warn};

use vpress_models::MusicTrack;

use crate::catalog::CatalogClient;
use crate::classifier::{build_selection_prompt, TrackClassifier};

/// Decides which catalog track (if any) a request gets.
pub struct MusicSelector {
    catalog: CatalogClient,
    classifier: Option<TrackClassifier>,
}

impl MusicSelector {
    pub fn new(catalog: CatalogClient, classifier: Option<TrackClassifier>) -> Self {
        Self { catalog, classifier }
    }

    /// Select a track by manual id, or via the classifier when `auto` is set.
    ///
    /// Never fails the request: every failure path logs and returns `None`.
    pub async fn select(
        &self,
        manual_track_id: Option<&str>,
        auto: bool,
        transcript: Option<&str>,
    ) -> Option<MusicTrack> {
        if let Some(id) = manual_track_id {
            return self.select_by_id(id).await;
        }

        if !auto {
            return None;
        }

        self.select_automatically(transcript).await
    }

    async fn select_by_id(&self, id: &str) -> Option<MusicTrack> {
        let tracks = match self.catalog.list_tracks().await {
            Ok(t) => t,
            Err(e) => {
                warn!("Catalog unavailable for manual track lookup: {}", e);
                return None;
            }
        };

        let found = tracks.into_iter().find(|t| t.id == id);
        if found.is_none() {
            warn!("Manual track id {:?} not found in catalog, skipping music", id);
        }
        found
    }

    async fn select_automatically(&self, transcript: Option<&str>) -> Option<MusicTrack> {
        let classifier = match &self.classifier {
            Some(c) => c,
            None => {
                info!("No classifier configured, skipping music selection");
                return None;
            }
        };

        let transcript = match transcript {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                info!("No transcript available, skipping music selection");
                return None;
            }
        };

        let tracks = match self.catalog.list_tracks().await {
            Ok(t) if !t.is_empty() => t,
            Ok(_) => {
                info!("Music catalog is empty, skipping music selection");
                return None;
            }
            Err(e) => {
                warn!("Catalog unavailable for auto selection: {}", e);
                return None;
            }
        };

        let prompt = build_selection_prompt(transcript, &tracks);
        let reply = match classifier.classify(&prompt).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Track classification failed, skipping music: {}", e);
                return None;
            }
        };

        match match_reply_to_track(&reply, &tracks) {
            Some(track) => {
                info!("Classifier chose track {:?} ({})", track.title, track.id);
                Some(track.clone())
            }
            None => {
                warn!("Classifier reply {:?} matches no catalog title, skipping music", reply);
                None
            }
        }
    }
}

/// Accept the classifier's reply only if it exactly matches one catalog
/// title (after trimming). Any other content skips music.
pub fn match_reply_to_track<'a>(reply: &str, tracks: &'a [MusicTrack]) -> Option<&'a MusicTrack> {
    let reply = reply.trim();
    tracks.iter().find(|t| t.title == reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogConfig;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn selector(base_url: String, classifier: Option<TrackClassifier>) -> MusicSelector {
        let catalog = CatalogClient::new(CatalogConfig {
            base_url,
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        MusicSelector::new(catalog, classifier)
    }

    async fn mock_catalog(tracks: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tracks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tracks": tracks })),
            )
            .mount(&server)
            .await;
        server
    }

    fn track(id: &str, title: &str) -> MusicTrack {
        MusicTrack {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            mood: String::new(),
            loudness_lufs: None,
            duration_seconds: None,
            source_url: String::new(),
        }
    }

    #[test]
    fn test_exact_title_matches() {
        let tracks = vec![track("t1", "Morning Drift"), track("t2", "Night Loop")];
        let found = match_reply_to_track("Night Loop", &tracks).unwrap();
        assert_eq!(found.id, "t2");
    }

    #[test]
    fn test_reply_is_trimmed() {
        let tracks = vec![track("t1", "Morning Drift")];
        assert!(match_reply_to_track("  Morning Drift\n", &tracks).is_some());
    }

    #[test]
    fn test_near_match_is_rejected() {
        let tracks = vec![track("t1", "Morning Drift")];
        assert!(match_reply_to_track("Morning drift", &tracks).is_none());
        assert!(match_reply_to_track("Morning Drift (calm)", &tracks).is_none());
        assert!(match_reply_to_track("1. Morning Drift", &tracks).is_none());
    }

    #[test]
    fn test_plausible_but_unknown_title_is_rejected() {
        let tracks = vec![track("t1", "Morning Drift")];
        assert!(match_reply_to_track("Evening Drift", &tracks).is_none());
    }

    #[test]
    fn test_empty_reply_is_rejected() {
        let tracks = vec![track("t1", "Morning Drift")];
        assert!(match_reply_to_track("", &tracks).is_none());
        assert!(match_reply_to_track("   ", &tracks).is_none());
    }

    #[tokio::test]
    async fn test_auto_select_without_classifier_skips() {
        // The classifier gate comes first, so no catalog call is made
        let s = selector("http://127.0.0.1:1".to_string(), None);
        assert!(s.select(None, true, Some("welcome to the show")).await.is_none());
    }

    #[tokio::test]
    async fn test_auto_select_without_transcript_skips() {
        let classifier = TrackClassifier::new("test-key").unwrap();
        let s = selector("http://127.0.0.1:1".to_string(), Some(classifier));
        assert!(s.select(None, true, None).await.is_none());
        let classifier = TrackClassifier::new("test-key").unwrap();
        let s = selector("http://127.0.0.1:1".to_string(), Some(classifier));
        assert!(s.select(None, true, Some("   ")).await.is_none());
    }

    #[tokio::test]
    async fn test_auto_select_with_empty_catalog_skips() {
        let server = mock_catalog(serde_json::json!([])).await;
        let classifier = TrackClassifier::new("test-key").unwrap();
        let s = selector(server.uri(), Some(classifier));
        assert!(s.select(None, true, Some("welcome to the show")).await.is_none());
    }

    #[tokio::test]
    async fn test_auto_select_with_unreachable_catalog_skips() {
        let classifier = TrackClassifier::new("test-key").unwrap();
        let s = selector("http://127.0.0.1:1".to_string(), Some(classifier));
        assert!(s.select(None, true, Some("welcome to the show")).await.is_none());
    }

    #[tokio::test]
    async fn test_manual_id_found_in_catalog() {
        let server = mock_catalog(serde_json::json!([{
            "id": "t2",
            "title": "Night Loop",
            "source_url": "https://cdn.example.com/t2.mp3"
        }]))
        .await;
        let s = selector(server.uri(), None);
        let found = s.select(Some("t2"), false, None).await.unwrap();
        assert_eq!(found.title, "Night Loop");
    }

    #[tokio::test]
    async fn test_manual_id_unknown_skips() {
        let server = mock_catalog(serde_json::json!([{
            "id": "t2",
            "title": "Night Loop",
            "source_url": "https://cdn.example.com/t2.mp3"
        }]))
        .await;
        let s = selector(server.uri(), None);
        assert!(s.select(Some("missing"), false, None).await.is_none());
    }

    #[tokio::test]
    async fn test_manual_id_with_unreachable_catalog_skips() {
        let s = selector("http://127.0.0.1:1".to_string(), None);
        assert!(s.select(Some("t2"), false, None).await.is_none());
    }
}
