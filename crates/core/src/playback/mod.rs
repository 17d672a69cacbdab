//! Play/pause clock and the bridge to the waveform widget.
//!
//! While the waveform has a decoded source and reports a position inside the
//! song, that position shifted by the song's placement is the playhead; the
//! frame delta only advances time when no audio is driving it.

use crate::{LyricVideoError, Result, Timeline};

const DECODE_FAILED: &str = "This audio format is not supported. Please use MP3 or WAV files.";
const LOAD_FAILED: &str = "Failed to load audio. Please check the file format.";
const PLAYBACK_FAILED: &str = "Playback failed. Please try reloading the page.";

/// The `isPlaying` half of the clock; the playhead itself lives on the
/// [`Timeline`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackClock {
    is_playing: bool,
}

impl PlaybackClock {
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn toggle(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Returns the playhead for the next frame, clamped to
    /// `[0, timeline.duration]`. Reaching the end pauses the clock.
    pub fn tick(
        &mut self,
        timeline: &Timeline,
        delta: f64,
        audio_position: Option<f64>,
    ) -> f64 {
        if !self.is_playing {
            return timeline.current_time;
        }

        let proposed = audio_position.unwrap_or(timeline.current_time + delta.max(0.0));
        let next = proposed.clamp(0.0, timeline.duration.max(0.0));
        if next >= timeline.duration {
            tracing::debug!(time = next, "playhead reached the end of the timeline");
            self.pause();
        }
        next
    }
}

/// Audio playback widget that renders the waveform of the active source.
pub trait WaveformBackend {
    /// Checks that the source at `url` decodes before it is handed to
    /// [`WaveformBackend::load`].
    fn decode(&mut self, url: &str) -> Result<()>;
    /// Starts loading; completion is reported through [`AudioSync::on_ready`]
    /// or [`AudioSync::on_error`].
    fn load(&mut self, url: &str) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// Moves playback to `seconds` from the start of the source.
    fn seek(&mut self, seconds: f64) -> Result<()>;
    /// Current position in seconds from the start of the source, if known.
    fn position(&self) -> Option<f64>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaveformStatus {
    Idle,
    Loading,
    Ready,
    /// Terminal for the current source; a different source retries.
    Failed(String),
}

/// Where the active audio sits on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SourceWindow {
    start_time: f64,
    duration: Option<f64>,
}

/// Keeps a [`WaveformBackend`] aligned with the timeline's active audio and
/// the play/pause flag.
#[derive(Debug)]
pub struct AudioSync<W> {
    backend: W,
    source: Option<(String, String)>,
    window: SourceWindow,
    status: WaveformStatus,
    commanded: Option<bool>,
    requested: bool,
    playback_error: Option<String>,
}

impl<W: WaveformBackend> AudioSync<W> {
    pub fn new(backend: W) -> Self {
        Self {
            backend,
            source: None,
            window: SourceWindow {
                start_time: 0.0,
                duration: None,
            },
            status: WaveformStatus::Idle,
            commanded: None,
            requested: false,
            playback_error: None,
        }
    }

    pub fn status(&self) -> &WaveformStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == WaveformStatus::Ready
    }

    pub fn backend(&self) -> &W {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut W {
        &mut self.backend
    }

    /// Id of the media currently loaded (or loading) into the widget.
    pub fn source_id(&self) -> Option<&str> {
        self.source.as_ref().map(|(id, _)| id.as_str())
    }

    /// Message to show beneath the waveform, if any.
    pub fn error_message(&self) -> Option<&str> {
        if let Some(message) = &self.playback_error {
            return Some(message.as_str());
        }
        match &self.status {
            WaveformStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Reloads the widget when the timeline's active audio changed and
    /// releases it when the timeline no longer has any audio.
    pub fn sync_source(&mut self, timeline: &Timeline) {
        let Some(audio) = timeline.active_audio() else {
            self.clear_source();
            return;
        };
        self.window = SourceWindow {
            start_time: audio.start_time,
            duration: audio.media.duration,
        };

        let key = (audio.media.id.clone(), audio.media.url.clone());
        if self.source.as_ref() == Some(&key) {
            return;
        }

        tracing::debug!(media = %key.0, "active audio source changed");
        let url = key.1.clone();
        self.source = Some(key);
        self.status = WaveformStatus::Loading;
        self.commanded = None;

        if let Err(err) = self.backend.decode(&url).and_then(|_| self.backend.load(&url)) {
            tracing::error!(%url, error = %err, "audio loading failed");
            self.status = WaveformStatus::Failed(DECODE_FAILED.to_string());
        }
    }

    /// Signal from the widget that the source finished loading.
    pub fn on_ready(&mut self) {
        if self.status != WaveformStatus::Loading {
            return;
        }
        self.status = WaveformStatus::Ready;
        self.apply_playback();
    }

    /// Signal from the widget that the source failed to load.
    pub fn on_error(&mut self, error: &LyricVideoError) {
        tracing::error!(%error, "waveform reported an error");
        self.status = WaveformStatus::Failed(LOAD_FAILED.to_string());
    }

    /// Forwards play/pause transitions to the widget once it is ready. After a
    /// playback failure no further transitions are attempted.
    pub fn sync_playback(&mut self, is_playing: bool) {
        self.requested = is_playing;
        self.apply_playback();
    }

    /// Timeline time the clock should adopt. Only available while ready and
    /// while the widget is inside the song.
    pub fn position(&self) -> Option<f64> {
        if !self.is_ready() || self.playback_error.is_some() {
            return None;
        }
        let local = self.backend.position()?;
        if self.window.duration.is_some_and(|duration| local >= duration) {
            return None;
        }
        Some(self.window.start_time + local)
    }

    /// Moves the widget to the song position matching `timeline_time`.
    /// Targets before the song start seek to its first sample.
    pub fn seek(&mut self, timeline_time: f64) {
        if !self.is_ready() || self.playback_error.is_some() {
            return;
        }
        let local = (timeline_time - self.window.start_time).max(0.0);
        if let Err(err) = self.backend.seek(local) {
            tracing::warn!(error = %err, position = local, "waveform seek failed");
        }
    }

    fn clear_source(&mut self) {
        let Some((id, _)) = self.source.take() else {
            return;
        };
        tracing::debug!(media = %id, "active audio left the timeline");
        if self.commanded == Some(true) {
            if let Err(err) = self.backend.pause() {
                tracing::warn!(error = %err, "pausing the released source failed");
            }
        }
        self.status = WaveformStatus::Idle;
        self.commanded = None;
    }

    fn apply_playback(&mut self) {
        if !self.is_ready()
            || self.playback_error.is_some()
            || self.commanded == Some(self.requested)
        {
            return;
        }

        let result = if self.requested {
            self.backend.play()
        } else {
            self.backend.pause()
        };

        match result {
            Ok(()) => self.commanded = Some(self.requested),
            Err(err) => {
                let err = LyricVideoError::PlaybackFailure(err.to_string());
                tracing::error!(error = %err, "waveform playback transition failed");
                self.playback_error = Some(PLAYBACK_FAILED.to_string());
            }
        }
    }
}
