//! Timeline data model: tracks of placed media and lyric lines.
//!
//! All times are seconds. Derived durations are kept current by the
//! functions in [`placement`], which take a timeline by reference and return
//! the next value.

pub mod placement;
mod ruler;

pub use ruler::{ruler_ticks, RulerTick, MAX_RULER_TICKS};

use serde::{Deserialize, Serialize};

use crate::{Media, MediaKind};

pub const DEFAULT_TIMELINE_ID: &str = "main-timeline";

/// Visual style of a lyric line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    pub animation: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 48.0,
            color: "#FFFFFF".to_string(),
            animation: "none".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    pub id: String,
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub style: TextStyle,
}

impl LyricLine {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            start_time,
            end_time,
            style: TextStyle::default(),
        }
    }
}

/// Independent copy of a catalog entry positioned on a track. Serialises
/// as the media fields plus `startTime`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedMedia {
    #[serde(flatten)]
    pub media: Media,
    pub start_time: f64,
}

impl PlacedMedia {
    pub fn new(media: Media, start_time: f64) -> Self {
        Self { media, start_time }
    }

    pub fn duration(&self) -> f64 {
        self.media.duration.unwrap_or(0.0)
    }

    /// Half-open visibility test: `start <= time < start + duration`.
    pub fn contains_time(&self, time: f64) -> bool {
        self.start_time <= time && time < self.start_time + self.duration()
    }
}

/// Entry stored in a track's item sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "lowercase")]
pub enum TrackItem {
    Media(PlacedMedia),
    Lyric(LyricLine),
}

impl TrackItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Media(placed) => &placed.media.id,
            Self::Lyric(line) => &line.id,
        }
    }

    pub fn start_time(&self) -> f64 {
        match self {
            Self::Media(placed) => placed.start_time,
            Self::Lyric(line) => line.start_time,
        }
    }

    pub fn effective_duration(&self) -> f64 {
        match self {
            Self::Media(placed) => placed.duration(),
            Self::Lyric(line) => line.end_time - line.start_time,
        }
    }

    pub fn end_time(&self) -> f64 {
        self.start_time() + self.effective_duration()
    }

    /// Rewrites the item's window in place. Media store the duration,
    /// lyric lines derive their end time from it.
    pub fn set_time(&mut self, start_time: f64, duration: f64) {
        match self {
            Self::Media(placed) => {
                placed.start_time = start_time;
                placed.media.duration = Some(duration);
            }
            Self::Lyric(line) => {
                line.start_time = start_time;
                line.end_time = start_time + duration;
            }
        }
    }

    pub fn as_media(&self) -> Option<&PlacedMedia> {
        match self {
            Self::Media(placed) => Some(placed),
            Self::Lyric(_) => None,
        }
    }

    /// Label shown on the item's timeline block.
    pub fn label(&self) -> &str {
        match self {
            Self::Media(placed) => &placed.media.name,
            Self::Lyric(line) => &line.text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Media,
    Lyrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    #[serde(default)]
    pub items: Vec<TrackItem>,
    #[serde(default)]
    pub duration: f64,
}

impl Track {
    pub fn new(id: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: id.into(),
            kind,
            items: Vec::new(),
            duration: 0.0,
        }
    }

    pub fn accepts(&self, item: &TrackItem) -> bool {
        matches!(
            (self.kind, item),
            (TrackKind::Media, TrackItem::Media(_)) | (TrackKind::Lyrics, TrackItem::Lyric(_))
        )
    }

    /// Latest end time over the items, never below zero.
    pub fn computed_duration(&self) -> f64 {
        self.items.iter().map(TrackItem::end_time).fold(0.0, f64::max)
    }

    pub fn recompute_duration(&mut self) {
        self.duration = self.computed_duration();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub id: String,
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub current_time: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::with_default_tracks()
    }
}

impl Timeline {
    pub fn new(id: impl Into<String>, tracks: Vec<Track>) -> Self {
        let mut timeline = Self {
            id: id.into(),
            tracks,
            duration: 0.0,
            current_time: 0.0,
        };
        timeline.recompute_durations();
        timeline
    }

    /// Two media tracks followed by one lyrics track.
    pub fn with_default_tracks() -> Self {
        Self::new(
            DEFAULT_TIMELINE_ID,
            vec![
                Track::new("media-track-1", TrackKind::Media),
                Track::new("media-track-2", TrackKind::Media),
                Track::new("lyrics-track", TrackKind::Lyrics),
            ],
        )
    }

    /// Recomputes every track's duration and then the timeline's.
    pub fn recompute_durations(&mut self) {
        for track in &mut self.tracks {
            track.recompute_duration();
        }
        self.duration = self.tracks.iter().map(|track| track.duration).fold(0.0, f64::max);
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id == id)
    }

    /// First item with the given id, in track-then-item order.
    pub fn find_item(&self, id: &str) -> Option<&TrackItem> {
        self.items().find(|item| item.id() == id)
    }

    pub fn items(&self) -> impl Iterator<Item = &TrackItem> {
        self.tracks.iter().flat_map(|track| track.items.iter())
    }

    /// The single audio source: the first audio item of the first media
    /// track.
    pub fn active_audio(&self) -> Option<&PlacedMedia> {
        self.tracks
            .iter()
            .find(|track| track.kind == TrackKind::Media)?
            .items
            .iter()
            .filter_map(TrackItem::as_media)
            .find(|placed| placed.media.kind == MediaKind::Audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, duration: f64) -> Media {
        Media::new(id, MediaKind::Video, format!("blob:{id}"), format!("{id}.mp4"))
            .with_duration(duration)
    }

    #[test]
    fn default_layout_is_empty() {
        let timeline = Timeline::default();
        let ids: Vec<_> = timeline.tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["media-track-1", "media-track-2", "lyrics-track"]);
        assert_eq!(timeline.duration, 0.0);
        assert_eq!(timeline.current_time, 0.0);
    }

    #[test]
    fn effective_duration_depends_on_variant() {
        let media = TrackItem::Media(PlacedMedia::new(video("m1", 10.0), 5.0));
        let line = TrackItem::Lyric(LyricLine::new("l1", "hello", 2.0, 7.0));

        assert_eq!(media.end_time(), 15.0);
        assert_eq!(line.effective_duration(), 5.0);
        assert_eq!(line.end_time(), 7.0);
    }

    #[test]
    fn media_without_duration_ends_at_start() {
        let image = Media::new("i1", MediaKind::Image, "blob:i1", "i1.png");
        let item = TrackItem::Media(PlacedMedia::new(image, 3.0));
        assert_eq!(item.end_time(), 3.0);
    }

    #[test]
    fn visibility_is_half_open() {
        let placed = PlacedMedia::new(video("m1", 10.0), 5.0);
        assert!(!placed.contains_time(4.99));
        assert!(placed.contains_time(5.0));
        assert!(placed.contains_time(6.0));
        assert!(!placed.contains_time(15.0));
    }

    #[test]
    fn tracks_only_accept_their_variant() {
        let media_track = Track::new("m", TrackKind::Media);
        let lyrics_track = Track::new("l", TrackKind::Lyrics);
        let line = TrackItem::Lyric(LyricLine::new("l1", "hi", 0.0, 1.0));

        assert!(!media_track.accepts(&line));
        assert!(lyrics_track.accepts(&line));
    }

    #[test]
    fn active_audio_scans_only_the_first_media_track() {
        let mut timeline = Timeline::default();
        let song = Media::new("a2", MediaKind::Audio, "blob:a2", "a2.mp3").with_duration(30.0);
        timeline.tracks[1].items.push(TrackItem::Media(PlacedMedia::new(song, 0.0)));
        assert!(timeline.active_audio().is_none());

        let first = Media::new("a1", MediaKind::Audio, "blob:a1", "a1.mp3").with_duration(30.0);
        timeline.tracks[0].items.push(TrackItem::Media(PlacedMedia::new(video("v", 3.0), 0.0)));
        timeline.tracks[0].items.push(TrackItem::Media(PlacedMedia::new(first, 0.0)));
        assert_eq!(timeline.active_audio().map(|p| p.media.id.as_str()), Some("a1"));
    }

    #[test]
    fn deserialises_and_recomputes() {
        let json = r#"{
            "id": "t",
            "tracks": [
                { "id": "m", "type": "media", "items": [
                    {
                        "item": "media", "id": "v", "type": "video", "url": "u",
                        "name": "n", "duration": 4, "startTime": 1
                    }
                ] },
                { "id": "l", "type": "lyrics", "items": [
                    { "item": "lyric", "id": "l1", "text": "la", "startTime": 0, "endTime": 9 }
                ] }
            ]
        }"#;
        let mut timeline: Timeline = serde_json::from_str(json).unwrap();
        timeline.recompute_durations();

        assert_eq!(timeline.tracks[0].duration, 5.0);
        assert_eq!(timeline.duration, 9.0);
        assert_eq!(timeline.find_item("l1").map(TrackItem::label), Some("la"));
    }

    #[test]
    fn placed_media_serialises_flat() {
        let media = Media::new("v", MediaKind::Video, "u", "n").with_duration(4.0);
        let item = TrackItem::Media(PlacedMedia::new(media, 1.5));

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["item"], "media");
        assert_eq!(value["id"], "v");
        assert_eq!(value["type"], "video");
        assert_eq!(value["startTime"], 1.5);
        assert!(value.get("media").is_none());

        let back: TrackItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }
}
