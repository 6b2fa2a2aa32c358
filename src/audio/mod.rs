//! Audio playback
//!
//! Rodio-backed audio for the demo: a looping background music track and a
//! one-shot click sound. Assets are decoded off-thread; until a clip has
//! arrived, playing it is a presence-checked no-op rather than an error.

pub mod engine;

pub use engine::AudioEngine;

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the audio subsystem
///
/// These never reach the interaction path; every failure downgrades to a
/// log line and leaves the affected clip absent.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available: {0}")]
    OutputUnavailable(String),

    #[error("failed to read audio asset {path}: {reason}")]
    LoadFailed { path: PathBuf, reason: String },

    #[error("failed to play audio: {0}")]
    PlaybackFailed(String),
}
