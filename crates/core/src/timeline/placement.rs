//! Pure transitions over [`Timeline`] values.
//!
//! Each function leaves its input untouched and returns the next timeline with
//! every track duration and the timeline duration recomputed.

use super::{LyricLine, PlacedMedia, Timeline, TrackItem, TrackKind};
use crate::Media;

/// Places a copy of `media` at `start_time`, appended to the end of the
/// target track. With no `track_id` every media track receives a copy; a
/// `track_id` naming a lyrics track places nothing.
pub fn add_to_timeline(
    timeline: &Timeline,
    media: &Media,
    track_id: Option<&str>,
    start_time: f64,
) -> Timeline {
    let mut next = timeline.clone();
    let mut placed = 0usize;

    for track in next
        .tracks
        .iter_mut()
        .filter(|track| track.kind == TrackKind::Media)
        .filter(|track| track_id.map_or(true, |id| track.id == id))
    {
        track
            .items
            .push(TrackItem::Media(PlacedMedia::new(media.clone(), start_time)));
        placed += 1;
    }

    if placed == 0 {
        tracing::debug!(media = %media.id, ?track_id, "no media track accepted the placement");
    } else {
        tracing::debug!(media = %media.id, ?track_id, start_time, placed, "media placed");
    }

    next.recompute_durations();
    next
}

/// Appends `line` to every lyrics track.
pub fn add_lyric_line(timeline: &Timeline, line: &LyricLine) -> Timeline {
    let mut next = timeline.clone();
    for track in next
        .tracks
        .iter_mut()
        .filter(|track| track.kind == TrackKind::Lyrics)
    {
        track.items.push(TrackItem::Lyric(line.clone()));
    }
    next.recompute_durations();
    next
}

/// Rewrites the window of every item whose id matches. No floor or bounds are
/// applied here; gesture sessions clamp before calling in.
pub fn set_item_time(timeline: &Timeline, id: &str, start_time: f64, duration: f64) -> Timeline {
    let mut next = timeline.clone();
    for item in next
        .tracks
        .iter_mut()
        .flat_map(|track| track.items.iter_mut())
        .filter(|item| item.id() == id)
    {
        item.set_time(start_time, duration);
    }
    next.recompute_durations();
    next
}

/// Drops every placed copy of the media `id`. Lyric lines are never removed,
/// even when their id collides.
pub fn remove_media_items(timeline: &Timeline, id: &str) -> Timeline {
    let mut next = timeline.clone();
    for track in &mut next.tracks {
        track
            .items
            .retain(|item| !matches!(item, TrackItem::Media(placed) if placed.media.id == id));
    }
    next.recompute_durations();
    next
}

/// Moves the playhead. The value is stored as given; clamping belongs to the
/// playback clock.
pub fn set_current_time(timeline: &Timeline, time: f64) -> Timeline {
    Timeline {
        current_time: time,
        ..timeline.clone()
    }
}
