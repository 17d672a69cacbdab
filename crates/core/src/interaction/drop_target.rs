use crate::{EditorState, LyricVideoError, Media, Result};

/// Converts a drop position on a track lane into seconds. The lane starts
/// after the track header.
pub fn drop_time(pointer_x: f64, lane_left: f64, header_width: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    ((pointer_x - lane_left - header_width) / scale).max(0.0)
}

/// Decodes the JSON media record carried by a drag operation.
pub fn parse_drop_payload(payload: &str) -> Result<Media> {
    if payload.trim().is_empty() {
        return Err(LyricVideoError::DroppedDataMalformed("no data received".to_string()));
    }

    let media: Media = serde_json::from_str(payload)
        .map_err(|err| LyricVideoError::DroppedDataMalformed(err.to_string()))?;

    if media.id.is_empty() || media.url.is_empty() || media.name.is_empty() {
        return Err(LyricVideoError::DroppedDataMalformed(
            "invalid media data structure".to_string(),
        ));
    }

    Ok(media)
}

/// Places the dropped media on `track_id` at `start_time`. A malformed
/// payload is logged and otherwise ignored.
pub fn handle_drop(
    state: &mut EditorState,
    track_id: &str,
    payload: &str,
    start_time: f64,
) -> bool {
    match parse_drop_payload(payload) {
        Ok(media) => {
            state.add_to_timeline(media, Some(track_id), start_time);
            true
        }
        Err(err) => {
            tracing::warn!(track = track_id, error = %err, "rejected dropped media");
            false
        }
    }
}
