//! Core library for the lyric video editor.
//!
//! Holds the timeline model and everything that reads or rewrites it:
//! placement of media and lyric lines, pointer gestures, the play/pause clock
//! with its waveform bridge, and the preview compositor. Platform services
//! (canvas, waveform widget, file probing) are traits implemented by the
//! host.

pub mod config;
pub mod editor;
pub mod error;
pub mod interaction;
pub mod media;
pub mod playback;
pub mod project;
pub mod render;
pub mod timeline;

pub use config::{AppConfig, PreviewConfig, TimelineConfig, UploadLimits};
pub use editor::{EditorAction, EditorState};
pub use error::{LyricVideoError, Result};
pub use interaction::{
    drop_time, handle_drop, parse_drop_payload, GestureMode, GestureSession, Interaction,
    ItemTimeChange, ResizeEdge,
};
pub use media::{
    classify_mime, ingest_upload, validate_upload, Media, MediaCatalog, MediaKind, MediaProbe,
    UploadRequest,
};
pub use playback::{AudioSync, PlaybackClock, WaveformBackend, WaveformStatus};
pub use project::{FormatPreset, ProjectSettings, VideoFormat, FORMAT_PRESETS};
pub use render::{visible_media, Canvas, Compositor, MediaElement, NextFrame};
pub use timeline::{
    ruler_ticks, LyricLine, PlacedMedia, RulerTick, TextStyle, Timeline, Track, TrackItem,
    TrackKind,
};
