//! Owned editor state and the reducer that applies every store operation.
//!
//! Each action replaces the affected top-level value with the result of a
//! pure transition, so readers always observe a complete timeline.

use crate::timeline::placement;
use crate::{
    AudioSync, LyricLine, Media, MediaCatalog, PlaybackClock, ProjectSettings, Timeline,
    TimelineConfig, WaveformBackend,
};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    SetProjectSettings(ProjectSettings),
    SetTimeline(Timeline),
    AddMedia(Media),
    RemoveMedia(String),
    AddToTimeline {
        media: Media,
        track_id: Option<String>,
        start_time: f64,
    },
    AddLyricLine(LyricLine),
    SetCurrentTime(f64),
    TogglePlayback,
    SelectItem(Option<String>),
    SetItemTime {
        id: String,
        start_time: f64,
        duration: f64,
    },
    SetTimelineScale(f64),
}

#[derive(Debug, Clone)]
pub struct EditorState {
    timeline: Timeline,
    catalog: MediaCatalog,
    selected_item_id: Option<String>,
    clock: PlaybackClock,
    project_settings: ProjectSettings,
    /// Pixels per second.
    timeline_scale: f64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(ProjectSettings::default(), &TimelineConfig::default())
    }
}

impl EditorState {
    pub fn new(project_settings: ProjectSettings, timeline_config: &TimelineConfig) -> Self {
        Self {
            timeline: Timeline::with_default_tracks(),
            catalog: MediaCatalog::new(),
            selected_item_id: None,
            clock: PlaybackClock::default(),
            project_settings,
            timeline_scale: timeline_config.scale,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }

    pub fn selected_item_id(&self) -> Option<&str> {
        self.selected_item_id.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn project_settings(&self) -> &ProjectSettings {
        &self.project_settings
    }

    pub fn timeline_scale(&self) -> f64 {
        self.timeline_scale
    }

    pub fn dispatch(&mut self, action: EditorAction) {
        match action {
            EditorAction::SetProjectSettings(settings) => self.project_settings = settings,
            EditorAction::SetTimeline(timeline) => self.timeline = timeline,
            EditorAction::AddMedia(media) => self.catalog.add(media),
            EditorAction::RemoveMedia(id) => {
                self.catalog.remove(&id);
                self.timeline = placement::remove_media_items(&self.timeline, &id);
            }
            EditorAction::AddToTimeline {
                media,
                track_id,
                start_time,
            } => {
                self.timeline = placement::add_to_timeline(
                    &self.timeline,
                    &media,
                    track_id.as_deref(),
                    start_time,
                );
            }
            EditorAction::AddLyricLine(line) => {
                self.timeline = placement::add_lyric_line(&self.timeline, &line);
            }
            EditorAction::SetCurrentTime(time) => {
                self.timeline = placement::set_current_time(&self.timeline, time);
            }
            EditorAction::TogglePlayback => self.clock.toggle(),
            EditorAction::SelectItem(id) => self.selected_item_id = id,
            EditorAction::SetItemTime {
                id,
                start_time,
                duration,
            } => {
                self.timeline = placement::set_item_time(&self.timeline, &id, start_time, duration);
            }
            EditorAction::SetTimelineScale(scale) => self.timeline_scale = scale,
        }
    }

    pub fn set_project_settings(&mut self, settings: ProjectSettings) {
        self.dispatch(EditorAction::SetProjectSettings(settings));
    }

    pub fn set_timeline(&mut self, timeline: Timeline) {
        self.dispatch(EditorAction::SetTimeline(timeline));
    }

    pub fn add_media(&mut self, media: Media) {
        self.dispatch(EditorAction::AddMedia(media));
    }

    pub fn remove_media(&mut self, id: &str) {
        self.dispatch(EditorAction::RemoveMedia(id.to_string()));
    }

    pub fn add_to_timeline(&mut self, media: Media, track_id: Option<&str>, start_time: f64) {
        self.dispatch(EditorAction::AddToTimeline {
            media,
            track_id: track_id.map(str::to_string),
            start_time,
        });
    }

    pub fn add_lyric_line(&mut self, line: LyricLine) {
        self.dispatch(EditorAction::AddLyricLine(line));
    }

    pub fn set_current_time(&mut self, time: f64) {
        self.dispatch(EditorAction::SetCurrentTime(time));
    }

    /// Moves the playhead and keeps a ready waveform at the matching song
    /// position, so the next tick does not snap back.
    pub fn seek<W: WaveformBackend>(&mut self, time: f64, audio: &mut AudioSync<W>) {
        self.set_current_time(time);
        audio.seek(time);
    }

    pub fn toggle_playback(&mut self) {
        self.dispatch(EditorAction::TogglePlayback);
    }

    pub fn select_item(&mut self, id: Option<&str>) {
        self.dispatch(EditorAction::SelectItem(id.map(str::to_string)));
    }

    pub fn set_item_time(&mut self, id: &str, start_time: f64, duration: f64) {
        self.dispatch(EditorAction::SetItemTime {
            id: id.to_string(),
            start_time,
            duration,
        });
    }

    pub fn set_timeline_scale(&mut self, scale: f64) {
        self.dispatch(EditorAction::SetTimelineScale(scale));
    }

    /// Advances the playhead by one frame. `audio_position` comes from the
    /// waveform when it is driving playback.
    pub fn tick(&mut self, delta: f64, audio_position: Option<f64>) -> f64 {
        let next = self.clock.tick(&self.timeline, delta, audio_position);
        if next != self.timeline.current_time {
            self.set_current_time(next);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MediaKind, TrackItem, VideoFormat};

    fn video(id: &str, duration: f64) -> Media {
        Media::new(id, MediaKind::Video, format!("blob:{id}"), format!("{id}.mp4"))
            .with_duration(duration)
    }

    #[test]
    fn starts_with_default_layout() {
        let state = EditorState::default();
        assert_eq!(state.timeline().tracks.len(), 3);
        assert_eq!(state.timeline_scale(), 100.0);
        assert!(!state.is_playing());
        assert!(state.selected_item_id().is_none());
    }

    #[test]
    fn place_then_remove_scenario() {
        let mut state = EditorState::default();
        state.add_media(video("m1", 10.0));
        state.add_to_timeline(video("m1", 10.0), Some("media-track-1"), 5.0);
        state.add_lyric_line(LyricLine::new("l1", "hello", 2.0, 7.0));

        assert_eq!(state.timeline().tracks[0].duration, 15.0);
        assert_eq!(state.timeline().tracks[2].duration, 7.0);
        assert_eq!(state.timeline().duration, 15.0);

        state.remove_media("m1");

        assert!(state.catalog().is_empty());
        assert!(state.timeline().tracks[0].items.is_empty());
        assert_eq!(state.timeline().tracks[0].duration, 0.0);
        assert_eq!(state.timeline().duration, 7.0);
        assert!(matches!(state.timeline().find_item("l1"), Some(TrackItem::Lyric(_))));
    }

    #[test]
    fn selection_is_not_validated() {
        let mut state = EditorState::default();
        state.select_item(Some("ghost"));
        assert_eq!(state.selected_item_id(), Some("ghost"));
        state.select_item(None);
        assert_eq!(state.selected_item_id(), None);
    }

    #[test]
    fn dispatch_replaces_settings_and_scale() {
        let mut state = EditorState::default();
        let portrait = ProjectSettings::for_format(VideoFormat::Portrait);
        state.dispatch(EditorAction::SetProjectSettings(portrait));
        state.dispatch(EditorAction::SetTimelineScale(40.0));

        assert_eq!(state.project_settings().height, 1920);
        assert_eq!(state.timeline_scale(), 40.0);
    }

    #[test]
    fn tick_moves_playhead_only_while_playing() {
        let mut state = EditorState::default();
        state.add_to_timeline(video("m1", 2.0), Some("media-track-1"), 0.0);

        assert_eq!(state.tick(0.5, None), 0.0);

        state.toggle_playback();
        assert_eq!(state.tick(0.5, None), 0.5);
        assert_eq!(state.tick(5.0, None), 2.0);
        assert_eq!(state.timeline().current_time, 2.0);
        assert!(!state.is_playing());
    }

    #[test]
    fn set_timeline_replaces_wholesale() {
        let mut state = EditorState::default();
        state.set_timeline(Timeline::new("other", Vec::new()));
        assert_eq!(state.timeline().id, "other");
        assert_eq!(state.timeline().duration, 0.0);
    }
}
