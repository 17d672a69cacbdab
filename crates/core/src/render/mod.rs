use std::collections::HashMap;

use crate::{MediaKind, PlacedMedia, ProjectSettings, Timeline};

/// Off-screen source the canvas draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaElement {
    pub item_id: String,
    pub kind: MediaKind,
    pub url: String,
    /// Videos are muted and looped regardless of their placement window.
    pub muted: bool,
    pub looped: bool,
}

impl MediaElement {
    fn for_media(placed: &PlacedMedia) -> Self {
        let is_video = placed.media.kind == MediaKind::Video;
        Self {
            item_id: placed.media.id.clone(),
            kind: placed.media.kind,
            url: placed.media.url.clone(),
            muted: is_video,
            looped: is_video,
        }
    }
}

/// 2D drawing surface for the preview.
pub trait Canvas {
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    /// Draws `element` stretched over the whole surface.
    fn draw(&mut self, element: &MediaElement, width: u32, height: u32);
}

/// Whether the frame callback should be scheduled again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextFrame {
    Reschedule,
    Stop,
}

/// Image and video items whose window contains `time`, in track order then
/// item order. Later entries are drawn on top.
pub fn visible_media(timeline: &Timeline, time: f64) -> Vec<&PlacedMedia> {
    timeline
        .items()
        .filter_map(|item| item.as_media())
        .filter(|placed| placed.media.kind.is_visual() && placed.contains_time(time))
        .collect()
}

/// Draws the visible set for the current playhead onto a [`Canvas`].
#[derive(Debug, Default)]
pub struct Compositor {
    elements: HashMap<String, MediaElement>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates elements for newly placed visual items and evicts those no
    /// track references any more.
    pub fn sync_elements(&mut self, timeline: &Timeline) {
        let visual: Vec<&PlacedMedia> = timeline
            .items()
            .filter_map(|item| item.as_media())
            .filter(|placed| placed.media.kind.is_visual())
            .collect();

        for placed in &visual {
            self.elements
                .entry(placed.media.id.clone())
                .or_insert_with(|| MediaElement::for_media(placed));
        }

        let before = self.elements.len();
        self.elements
            .retain(|id, _| visual.iter().any(|placed| &placed.media.id == id));
        let evicted = before - self.elements.len();
        if evicted > 0 {
            tracing::debug!(evicted, "evicted unreferenced media elements");
        }
    }

    pub fn element(&self, id: &str) -> Option<&MediaElement> {
        self.elements.get(id)
    }

    pub fn cached_elements(&self) -> usize {
        self.elements.len()
    }

    /// Renders one frame and reports whether the loop continues. Items whose
    /// element is missing are skipped.
    pub fn render_frame(
        &mut self,
        timeline: &Timeline,
        settings: &ProjectSettings,
        is_playing: bool,
        canvas: &mut impl Canvas,
    ) -> NextFrame {
        self.sync_elements(timeline);

        if canvas.size() != (settings.width, settings.height) {
            canvas.set_size(settings.width, settings.height);
        }
        canvas.clear();

        let (width, height) = canvas.size();
        for placed in visible_media(timeline, timeline.current_time) {
            if let Some(element) = self.elements.get(&placed.media.id) {
                canvas.draw(element, width, height);
            }
        }

        if is_playing {
            NextFrame::Reschedule
        } else {
            NextFrame::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::placement::{add_to_timeline, remove_media_items, set_current_time};
    use crate::{Media, VideoFormat};

    #[derive(Debug, Default)]
    struct RecordingCanvas {
        size: (u32, u32),
        ops: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn clear(&mut self) {
            self.ops.push("clear".to_string());
        }

        fn draw(&mut self, element: &MediaElement, width: u32, height: u32) {
            self.ops.push(format!("draw {} {width}x{height}", element.item_id));
        }
    }

    fn media(id: &str, kind: MediaKind, duration: f64) -> Media {
        Media::new(id, kind, format!("blob:{id}"), id).with_duration(duration)
    }

    fn sample() -> Timeline {
        let placements = [
            (media("v1", MediaKind::Video, 10.0), "media-track-1", 5.0),
            (media("i1", MediaKind::Image, 4.0), "media-track-2", 4.0),
            (media("a1", MediaKind::Audio, 30.0), "media-track-1", 0.0),
        ];
        placements
            .iter()
            .fold(Timeline::default(), |timeline, (media, track, start)| {
                add_to_timeline(&timeline, media, Some(*track), *start)
            })
    }

    #[test]
    fn visible_set_uses_half_open_windows() {
        let timeline = sample();
        let ids = |t: f64| -> Vec<String> {
            visible_media(&timeline, t).iter().map(|p| p.media.id.clone()).collect()
        };

        assert_eq!(ids(6.0), ["v1", "i1"]);
        assert_eq!(ids(8.0), ["v1"]);
        assert!(ids(15.0).is_empty());
        assert!(ids(1.0).is_empty());
    }

    #[test]
    fn draws_in_track_order_at_project_size() {
        let timeline = set_current_time(&sample(), 6.0);
        let settings = ProjectSettings::for_format(VideoFormat::Square);
        let mut canvas = RecordingCanvas::default();
        let mut compositor = Compositor::new();

        let next = compositor.render_frame(&timeline, &settings, false, &mut canvas);

        assert_eq!(next, NextFrame::Stop);
        assert_eq!(canvas.ops, ["clear", "draw v1 1080x1080", "draw i1 1080x1080"]);
    }

    #[test]
    fn keeps_rescheduling_while_playing() {
        let mut canvas = RecordingCanvas::default();
        let next = Compositor::new().render_frame(
            &sample(),
            &ProjectSettings::default(),
            true,
            &mut canvas,
        );
        assert_eq!(next, NextFrame::Reschedule);
        assert_eq!(canvas.size, (1920, 1080));
    }

    #[test]
    fn caches_visual_elements_and_evicts_removed_ones() {
        let mut compositor = Compositor::new();
        compositor.sync_elements(&sample());

        assert_eq!(compositor.cached_elements(), 2);
        assert!(compositor.element("a1").is_none());
        let video = compositor.element("v1").unwrap();
        assert!(video.muted && video.looped);
        assert!(!compositor.element("i1").unwrap().looped);

        compositor.sync_elements(&remove_media_items(&sample(), "v1"));
        assert_eq!(compositor.cached_elements(), 1);
        assert!(compositor.element("v1").is_none());
    }
}
