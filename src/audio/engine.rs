//! Rodio audio engine
//!
//! One `Sink` per playing clip on top of the default output stream. Asset
//! bytes are read on a loader thread and handed over through an mpsc
//! channel; `poll()` drains completions once per frame on the main thread,
//! so the rest of the app only ever sees "loaded" or "not loaded yet".

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

use super::AudioError;

/// Which of the two demo clips a loader completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipKind {
    Music,
    Click,
}

struct LoadedClip {
    kind: ClipKind,
    data: Vec<u8>,
}

/// Audio engine holding the output stream and the two demo clips
pub struct AudioEngine {
    /// Output stream must be kept alive for playback to continue
    _output_stream: OutputStream,
    stream_handle: OutputStreamHandle,

    loader_tx: Sender<LoadedClip>,
    loader_rx: Receiver<LoadedClip>,

    /// Looping background music sink, created once the asset arrives
    music_sink: Option<Sink>,
    music_volume: f32,

    /// Raw click asset bytes; decoded fresh for every one-shot playback
    click_data: Option<Vec<u8>>,
    click_volume: f32,
    /// One-shot sinks kept alive until they finish
    click_sinks: Vec<Sink>,
}

impl AudioEngine {
    /// Creates the engine on the default output device
    pub fn new() -> Result<Self, AudioError> {
        let (output_stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::OutputUnavailable(e.to_string()))?;

        let (loader_tx, loader_rx) = channel();

        log::info!("audio engine initialized");

        Ok(Self {
            _output_stream: output_stream,
            stream_handle,
            loader_tx,
            loader_rx,
            music_sink: None,
            music_volume: 0.5,
            click_data: None,
            click_volume: 1.0,
            click_sinks: Vec::new(),
        })
    }

    /// Starts loading the background music asset off-thread
    ///
    /// The music begins playing (looping, at the configured volume) on the
    /// first `poll()` after the load completes.
    pub fn load_music<P: AsRef<Path>>(&self, path: P) {
        Self::spawn_loader(self.loader_tx.clone(), path.as_ref().to_path_buf(), ClipKind::Music);
    }

    /// Starts loading the click sound asset off-thread
    pub fn load_click<P: AsRef<Path>>(&self, path: P) {
        Self::spawn_loader(self.loader_tx.clone(), path.as_ref().to_path_buf(), ClipKind::Click);
    }

    fn spawn_loader(tx: Sender<LoadedClip>, path: PathBuf, kind: ClipKind) {
        std::thread::spawn(move || match std::fs::read(&path) {
            Ok(data) => {
                // The receiver is gone only if the engine was dropped
                let _ = tx.send(LoadedClip { kind, data });
            }
            Err(e) => {
                log::warn!("could not load audio asset {}: {}", path.display(), e);
            }
        });
    }

    /// Drains loader completions and prunes finished one-shot sinks.
    ///
    /// Called once per frame from the render loop.
    pub fn poll(&mut self) {
        while let Ok(clip) = self.loader_rx.try_recv() {
            match clip.kind {
                ClipKind::Music => {
                    match self.start_music(&clip.data) {
                        Ok(()) => log::info!("background music started"),
                        Err(e) => log::warn!("background music unavailable: {}", e),
                    }
                }
                ClipKind::Click => {
                    log::info!("click sound loaded");
                    self.click_data = Some(clip.data);
                }
            }
        }

        self.click_sinks.retain(|sink| !sink.empty());
    }

    fn start_music(&mut self, data: &[u8]) -> Result<(), AudioError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;
        let source = Decoder::new(Cursor::new(data.to_vec()))
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;

        sink.set_volume(self.music_volume);
        sink.append(source.repeat_infinite());
        self.music_sink = Some(sink);
        Ok(())
    }

    /// Plays the click sound if it has finished loading.
    ///
    /// A click before load-completion is a silent no-op; returns whether a
    /// sound was actually started.
    pub fn play_click(&mut self) -> bool {
        let Some(data) = &self.click_data else {
            return false;
        };

        let sink = match Sink::try_new(&self.stream_handle) {
            Ok(sink) => sink,
            Err(e) => {
                log::warn!("click playback failed: {}", e);
                return false;
            }
        };
        let source = match Decoder::new(Cursor::new(data.clone())) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("click playback failed: {}", e);
                return false;
            }
        };

        sink.set_volume(self.click_volume);
        sink.append(source);
        self.click_sinks.push(sink);
        true
    }

    /// Whether the click clip has finished loading
    pub fn is_click_loaded(&self) -> bool {
        self.click_data.is_some()
    }

    /// Whether the background music is currently playing
    pub fn is_music_playing(&self) -> bool {
        self.music_sink
            .as_ref()
            .map(|sink| !sink.is_paused() && !sink.empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Audio tests run only when an output device exists, so they pass in
    // headless CI environments.

    #[test]
    fn click_before_load_is_a_no_op() {
        if let Ok(mut engine) = AudioEngine::new() {
            assert!(!engine.is_click_loaded());
            assert!(!engine.play_click());
        }
    }

    #[test]
    fn missing_asset_leaves_clip_absent() {
        if let Ok(mut engine) = AudioEngine::new() {
            engine.load_click("does/not/exist.mp3");

            // The loader thread logs and sends nothing; give it a moment
            std::thread::sleep(std::time::Duration::from_millis(100));
            engine.poll();

            assert!(!engine.is_click_loaded());
            assert!(!engine.play_click());
        }
    }

    #[test]
    fn music_is_not_playing_before_load() {
        if let Ok(engine) = AudioEngine::new() {
            assert!(!engine.is_music_playing());
        }
    }
}
