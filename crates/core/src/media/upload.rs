use uuid::Uuid;

use crate::{LyricVideoError, Media, MediaKind, Result, UploadLimits};

/// Metadata of a raw file offered for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub name: String,
    pub mime: String,
    pub size_bytes: u64,
}

/// Platform services needed to turn a validated file into a [`Media`] record.
pub trait MediaProbe {
    /// Verifies that the file's audio data can be decoded.
    fn decode_audio(&mut self, request: &UploadRequest) -> Result<()>;
    /// Returns an object reference the preview and waveform can load from.
    fn object_url(&mut self, request: &UploadRequest) -> Result<String>;
    /// Reads the playable duration, in seconds, of audio and video files.
    fn duration(&mut self, request: &UploadRequest, url: &str) -> Result<f64>;
    /// Renders a still frame for video files.
    fn thumbnail(&mut self, request: &UploadRequest, url: &str) -> Result<String>;
}

pub fn classify_mime(mime: &str, limits: &UploadLimits) -> Option<MediaKind> {
    [MediaKind::Audio, MediaKind::Video, MediaKind::Image]
        .into_iter()
        .find(|kind| limits.accepted_types(*kind).iter().any(|accepted| accepted == mime))
}

/// Checks size first, then type.
pub fn validate_upload(request: &UploadRequest, limits: &UploadLimits) -> Result<MediaKind> {
    if request.size_bytes > limits.max_bytes {
        return Err(LyricVideoError::FileTooLarge {
            size: request.size_bytes,
            limit: limits.max_bytes,
        });
    }

    classify_mime(&request.mime, limits)
        .ok_or_else(|| LyricVideoError::UnsupportedFileType(request.mime.clone()))
}

/// Validates one file and builds its catalog record. An error is terminal for
/// this file only.
pub fn ingest_upload(
    request: &UploadRequest,
    limits: &UploadLimits,
    probe: &mut impl MediaProbe,
) -> Result<Media> {
    let kind = validate_upload(request, limits)?;

    if kind == MediaKind::Audio {
        probe.decode_audio(request).map_err(|err| match err {
            LyricVideoError::InvalidAudioDecode(_) => err,
            other => LyricVideoError::InvalidAudioDecode(other.to_string()),
        })?;
    }

    let url = probe.object_url(request)?;
    let mut media = Media::new(Uuid::new_v4().to_string(), kind, url, request.name.clone());

    if matches!(kind, MediaKind::Audio | MediaKind::Video) {
        media.duration = Some(probe.duration(request, &media.url)?);
    }
    if kind == MediaKind::Video {
        media.thumbnail = Some(probe.thumbnail(request, &media.url)?);
    }

    tracing::debug!(name = %media.name, kind = ?kind, "upload accepted");
    Ok(media)
}
