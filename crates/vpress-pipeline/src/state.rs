//! Per-request pipeline state.

use std::path::PathBuf;

use vpress_models::{MusicTrack, Transcript};

/// Mutable record carried through one pipeline run.
///
/// The working file advances stage by stage; temp paths themselves are
/// owned by the [`crate::ledger::ResourceLedger`], never deleted here.
#[derive(Debug)]
pub struct PipelineState {
    /// Output of the most recent completed stage
    pub working_file: PathBuf,
    /// Extension of the working file, tracked so a skipped conversion
    /// publishes under its native format
    pub working_ext: String,
    /// Applied playback rate; 1.0 until the tempo stage runs
    pub playback_rate: f64,
    /// Transcript, when the transcription stage produced one
    pub transcript: Option<Transcript>,
    /// Music track chosen for this run, if any
    pub track: Option<MusicTrack>,
}

impl PipelineState {
    pub fn new(working_file: PathBuf, working_ext: impl Into<String>) -> Self {
        Self {
            working_file,
            working_ext: working_ext.into(),
            playback_rate: 1.0,
            transcript: None,
            track: None,
        }
    }

    /// Advance the working file to the next stage's output.
    pub fn advance(&mut self, path: PathBuf, ext: impl Into<String>) {
        self.working_file = path;
        self.working_ext = ext.into();
    }
}
