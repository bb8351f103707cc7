//! The end-to-end processing pipeline.
//!
//! One run per request, stages strictly forward. Optional features
//! (transcription, music, format conversion) degrade silently on failure;
//! acquire, silence removal, an entered tempo pass and publish are fatal.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use vpress_catalog::MusicSelector;
use vpress_media::{
    download_to_file, filters, get_duration, FfmpegCommand, FfmpegRunner, MediaResult,
};
use vpress_models::{srt, ExportFormat, InputSource, MusicTrack, ProcessingParams};
use vpress_storage::{unique_output_key, ObjectStoreClient};
use vpress_transcribe::TranscribeClient;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::ledger::ResourceLedger;
use crate::stages::{effective_min_duration, should_skip_silence_filter, tempo_rate};
use crate::state::PipelineState;

/// Final artifacts of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub audio_url: String,
    pub srt_url: Option<String>,
}

/// Orchestrates one pipeline run per request.
///
/// Holds only stateless client handles; safe to share across concurrent
/// requests.
pub struct Pipeline {
    config: PipelineConfig,
    storage: ObjectStoreClient,
    transcriber: Option<TranscribeClient>,
    selector: MusicSelector,
    http: reqwest::Client,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        storage: ObjectStoreClient,
        transcriber: Option<TranscribeClient>,
        selector: MusicSelector,
        http: reqwest::Client,
    ) -> Self {
        Self {
            config,
            storage,
            transcriber,
            selector,
            http,
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Every temp artifact is released before this returns, on success and
    /// failure alike.
    pub async fn run(
        &self,
        input: InputSource,
        params: &ProcessingParams,
    ) -> PipelineResult<PipelineOutput> {
        let request_id = Uuid::new_v4();
        let mut ledger = ResourceLedger::new();

        let result = self.run_inner(request_id, input, params, &mut ledger).await;
        ledger.release_all().await;

        match &result {
            Ok(output) => info!(request_id = %request_id, url = %output.audio_url, "Pipeline run succeeded"),
            Err(e) => warn!(request_id = %request_id, error = %e, "Pipeline run failed"),
        }

        result
    }

    async fn run_inner(
        &self,
        request_id: Uuid,
        input: InputSource,
        params: &ProcessingParams,
        ledger: &mut ResourceLedger,
    ) -> PipelineResult<PipelineOutput> {
        // Stage 1: acquire the input to a local path
        let work_dir = self.config.work_dir.join(request_id.to_string());
        tokio::fs::create_dir_all(&work_dir).await?;
        ledger.track(&work_dir);

        let (input_file, input_ext) = self.acquire(&work_dir, input, ledger).await?;
        let mut state = PipelineState::new(input_file, input_ext);

        // Stage 2: silence removal
        self.remove_silence(&work_dir, params, &mut state, ledger)
            .await?;

        // Stage 3: probe the pass-1 duration; failure skips tempo
        let probed = match get_duration(&state.working_file).await {
            Ok(d) => Some(d),
            Err(e) => {
                warn!("Duration probe failed, skipping tempo adjustment: {}", e);
                None
            }
        };

        // Stage 4: tempo adjustment
        if let (Some(probed), Some(target)) = (probed, params.target_duration_seconds) {
            if let Some(rate) = tempo_rate(probed, target, self.config.duration_tolerance_seconds) {
                self.adjust_tempo(&work_dir, rate, &mut state, ledger).await?;
            }
        }

        // Stage 5: transcription
        let srt_file = self.transcribe(&work_dir, params, &mut state, ledger).await;

        // Stage 6: music selection
        if params.add_music {
            state.track = self
                .selector
                .select(
                    params.effective_manual_track_id(),
                    params.auto_select_music,
                    state.transcript.as_ref().map(|t| t.text.as_str()),
                )
                .await;
        }

        // Stage 7: music pipeline; any failure reverts to the voice-over
        if let Some(track) = state.track.clone() {
            match self
                .apply_music(&work_dir, &track, params, &state, ledger)
                .await
            {
                Ok(mixed) => state.advance(mixed, "wav"),
                Err(e) => {
                    warn!("Music stage failed, continuing without music: {}", e);
                }
            }
        }

        // Stage 8: format conversion; failure falls back to the native format
        if params.export_format == ExportFormat::Mp3 && state.working_ext != "mp3" {
            let mp3_out = work_dir.join("final.mp3");
            ledger.track(&mp3_out);
            let cmd = FfmpegCommand::new(&state.working_file, &mp3_out)
                .no_video()
                .audio_codec("libmp3lame")
                .audio_bitrate("192k");
            match self.runner().run(&cmd).await {
                Ok(()) => state.advance(mp3_out, "mp3"),
                Err(e) => {
                    warn!("MP3 conversion failed, publishing native format: {}", e);
                }
            }
        }

        // Stage 9: publish
        self.publish(request_id, &state, srt_file.as_deref()).await
    }

    fn runner(&self) -> FfmpegRunner {
        FfmpegRunner::new().with_timeout(self.config.ffmpeg_timeout_secs)
    }

    /// Materialize the input source into the work directory.
    async fn acquire(
        &self,
        work_dir: &Path,
        input: InputSource,
        ledger: &mut ResourceLedger,
    ) -> PipelineResult<(PathBuf, String)> {
        match input {
            InputSource::Upload { filename, bytes } => {
                if bytes.is_empty() {
                    return Err(PipelineError::invalid_input("uploaded file is empty"));
                }
                let ext = extension_of(&filename);
                let path = work_dir.join(format!("input.{}", ext));
                ledger.track(&path);
                tokio::fs::write(&path, &bytes).await?;
                Ok((path, ext))
            }
            InputSource::RemoteUrl(url) => {
                let ext = extension_of(&url);
                let path = work_dir.join(format!("input.{}", ext));
                ledger.track(&path);
                download_to_file(&self.http, &url, &path)
                    .await
                    .map_err(|e| {
                        PipelineError::invalid_input(format!("failed to download input: {}", e))
                    })?;
                Ok((path, ext))
            }
        }
    }

    /// Pass 1: strip silence, or carry the input forward when padding makes
    /// the filter a no-op.
    async fn remove_silence(
        &self,
        work_dir: &Path,
        params: &ProcessingParams,
        state: &mut PipelineState,
        ledger: &mut ResourceLedger,
    ) -> PipelineResult<()> {
        if should_skip_silence_filter(params.min_duration, params.left_padding, params.right_padding)
        {
            info!("Silence filter skipped: padding preserves every run");
            return Ok(());
        }

        let effective =
            effective_min_duration(params.min_duration, params.left_padding, params.right_padding);
        let output = work_dir.join("pass1.wav");
        ledger.track(&output);

        let cmd = FfmpegCommand::new(&state.working_file, &output)
            .no_video()
            .audio_filter(filters::filter_remove_silence(params.threshold_db, effective));

        self.runner()
            .run(&cmd)
            .await
            .map_err(|e| PipelineError::stage("silence removal", e))?;

        state.advance(output, "wav");
        Ok(())
    }

    /// Pass 2: speed up to fit the target duration.
    async fn adjust_tempo(
        &self,
        work_dir: &Path,
        rate: f64,
        state: &mut PipelineState,
        ledger: &mut ResourceLedger,
    ) -> PipelineResult<()> {
        info!("Applying tempo adjustment, rate {:.3}", rate);
        let output = work_dir.join("pass2.wav");
        ledger.track(&output);

        let cmd = FfmpegCommand::new(&state.working_file, &output)
            .no_video()
            .audio_filter(filters::filter_atempo(rate));

        self.runner()
            .run(&cmd)
            .await
            .map_err(|e| PipelineError::stage("tempo adjustment", e))?;

        state.playback_rate = rate;
        state.advance(output, "wav");
        Ok(())
    }

    /// Transcribe the working file when a transcript is wanted, and write
    /// the SRT file when subtitles were requested. Never fatal.
    async fn transcribe(
        &self,
        work_dir: &Path,
        params: &ProcessingParams,
        state: &mut PipelineState,
        ledger: &mut ResourceLedger,
    ) -> Option<PathBuf> {
        if !params.wants_transcript() {
            return None;
        }

        let transcriber = match &self.transcriber {
            Some(t) => t,
            None => {
                info!("Transcription service not configured, skipping transcript");
                return None;
            }
        };

        match transcriber.transcribe(&state.working_file).await {
            Ok(transcript) => state.transcript = Some(transcript),
            Err(e) => {
                warn!("Transcription failed, continuing without transcript: {}", e);
                return None;
            }
        }

        if !params.transcribe_requested {
            return None;
        }

        let transcript = state.transcript.as_ref()?;
        let content = srt::build_srt(&transcript.words);
        if content.is_empty() {
            info!("Transcript produced no usable cues, skipping SRT");
            return None;
        }

        let path = work_dir.join("subtitles.srt");
        ledger.track(&path);
        match tokio::fs::write(&path, content).await {
            Ok(()) => Some(path),
            Err(e) => {
                warn!("Failed to write SRT file: {}", e);
                None
            }
        }
    }

    /// Download, normalize, fade, trim and mix the music bed under the
    /// voice-over. Errors propagate to the caller, which treats them as
    /// non-fatal.
    async fn apply_music(
        &self,
        work_dir: &Path,
        track: &MusicTrack,
        params: &ProcessingParams,
        state: &PipelineState,
        ledger: &mut ResourceLedger,
    ) -> MediaResult<PathBuf> {
        info!("Applying music track {:?}", track.title);

        let raw = work_dir.join("music_source");
        ledger.track(&raw);
        download_to_file(&self.http, &track.source_url, &raw).await?;

        // Normalize only when the catalog knows the source loudness
        let bed = if track.loudness_lufs.is_some() {
            let normalized = work_dir.join("music_norm.wav");
            ledger.track(&normalized);
            let cmd = FfmpegCommand::new(&raw, &normalized)
                .no_video()
                .audio_filter(filters::filter_loudnorm(params.music_target_lufs));
            self.runner().run(&cmd).await?;
            normalized
        } else {
            raw
        };

        let voice_duration = get_duration(&state.working_file).await?;
        let music_duration = get_duration(&bed).await?;

        // A bed shorter than the voice gets a fade-out ending exactly at
        // its natural end, before any trimming
        let bed = if music_duration < voice_duration {
            let faded = work_dir.join("music_fade.wav");
            ledger.track(&faded);
            let fade_start = (music_duration - self.config.fade_seconds).max(0.0);
            let cmd = FfmpegCommand::new(&bed, &faded)
                .no_video()
                .audio_filter(filters::filter_fade_out(fade_start, self.config.fade_seconds));
            self.runner().run(&cmd).await?;
            faded
        } else {
            bed
        };

        // Trim from time zero to exactly the voice-over duration
        let trimmed = work_dir.join("music_trim.wav");
        ledger.track(&trimmed);
        let cmd = FfmpegCommand::new(&bed, &trimmed)
            .no_video()
            .duration(voice_duration);
        self.runner().run(&cmd).await?;

        // Mix: voice first, ducked bed second, output follows the voice
        let mixed = work_dir.join("mixed.wav");
        ledger.track(&mixed);
        let cmd = FfmpegCommand::new(&state.working_file, &mixed)
            .add_input(&trimmed)
            .filter_complex(filters::filter_duck_and_mix(params.music_ducking_db));
        self.runner().run(&cmd).await?;

        Ok(mixed)
    }

    /// Upload the final artifacts and build their public URLs.
    async fn publish(
        &self,
        request_id: Uuid,
        state: &PipelineState,
        srt_file: Option<&Path>,
    ) -> PipelineResult<PipelineOutput> {
        let audio_key = unique_output_key(&request_id, &state.working_ext);
        self.storage
            .upload_file(
                &state.working_file,
                &audio_key,
                content_type_for(&state.working_ext),
            )
            .await?;
        let audio_url = self
            .storage
            .public_url(&audio_key, self.config.public_url_ttl)
            .await?;

        let srt_url = match srt_file {
            Some(path) => {
                let srt_key = unique_output_key(&request_id, "srt");
                self.storage
                    .upload_file(path, &srt_key, "application/x-subrip")
                    .await?;
                Some(
                    self.storage
                        .public_url(&srt_key, self.config.public_url_ttl)
                        .await?,
                )
            }
            None => None,
        };

        Ok(PipelineOutput { audio_url, srt_url })
    }
}

/// Lowercased extension of a filename or URL path, defaulting to `wav`.
fn extension_of(name: &str) -> String {
    let name = name.split(['?', '#']).next().unwrap_or(name);
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()) && e.len() <= 5)
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "wav".to_string())
}

/// MIME type for a published artifact.
fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}
