use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{MediaKind, ProjectSettings, Result};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project: ProjectSettings,
    pub upload: UploadLimits,
    pub timeline: TimelineConfig,
    pub preview: PreviewConfig,
}

impl AppConfig {
    /// Reads a JSON configuration file. Fields missing from the file keep
    /// their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }
}

/// Limits applied by the upload validation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    pub max_bytes: u64,
    pub audio_types: Vec<String>,
    pub video_types: Vec<String>,
    pub image_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: 100 * 1024 * 1024,
            audio_types: vec!["audio/mpeg".into(), "audio/wav".into()],
            video_types: vec!["video/mp4".into(), "video/webm".into()],
            image_types: vec!["image/jpeg".into(), "image/png".into(), "image/gif".into()],
        }
    }
}

impl UploadLimits {
    pub fn accepted_types(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Audio => &self.audio_types,
            MediaKind::Video => &self.video_types,
            MediaKind::Image => &self.image_types,
        }
    }
}

/// Timeline geometry shared by the interaction layer and the ruler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Pixels per second.
    pub scale: f64,
    /// Shortest duration a resize gesture may produce, in seconds.
    pub min_item_duration: f64,
    pub track_header_width: f64,
    pub ruler_interval: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            scale: 100.0,
            min_item_duration: 0.1,
            track_header_width: 64.0,
            ruler_interval: 5.0,
        }
    }
}

/// Configuration specific to the preview loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub frame_rate: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { frame_rate: 60 }
    }
}

impl PreviewConfig {
    pub fn frame_interval(&self) -> f64 {
        1.0 / f64::from(self.frame_rate.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let raw = r#"{ "timeline": { "scale": 50.0 }, "preview": { "frame_rate": 30 } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();

        assert_eq!(config.timeline.scale, 50.0);
        assert_eq!(config.timeline.min_item_duration, 0.1);
        assert_eq!(config.upload.max_bytes, 100 * 1024 * 1024);
        assert_eq!(config.project.width, 1920);
        assert!((config.preview.frame_interval() - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir()
            .join(format!("lyric-video-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "upload": { "max_bytes": 10 } }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.upload.max_bytes, 10);
        assert_eq!(config.upload.audio_types.len(), 2);
    }
}
