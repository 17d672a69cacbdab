use serde::{Deserialize, Serialize};

/// Output aspect ratio chosen for the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Landscape,
    Portrait,
    Square,
}

/// A selectable format together with its preset output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatPreset {
    pub format: VideoFormat,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const FORMAT_PRESETS: [FormatPreset; 3] = [
    FormatPreset {
        format: VideoFormat::Landscape,
        label: "Landscape (16:9)",
        width: 1920,
        height: 1080,
    },
    FormatPreset {
        format: VideoFormat::Portrait,
        label: "Portrait (9:16)",
        width: 1080,
        height: 1920,
    },
    FormatPreset {
        format: VideoFormat::Square,
        label: "Square (1:1)",
        width: 1080,
        height: 1080,
    },
];

impl VideoFormat {
    pub fn preset(self) -> &'static FormatPreset {
        match self {
            Self::Landscape => &FORMAT_PRESETS[0],
            Self::Portrait => &FORMAT_PRESETS[1],
            Self::Square => &FORMAT_PRESETS[2],
        }
    }
}

/// Output settings consumed by the preview compositor. Width and height are
/// not checked against the format's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub format: VideoFormat,
    pub width: u32,
    pub height: u32,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self::for_format(VideoFormat::Landscape)
    }
}

impl ProjectSettings {
    pub fn for_format(format: VideoFormat) -> Self {
        let preset = format.preset();
        Self {
            format,
            width: preset.width,
            height: preset.height,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_landscape_full_hd() {
        let settings = ProjectSettings::default();
        assert_eq!(settings.format, VideoFormat::Landscape);
        assert_eq!((settings.width, settings.height), (1920, 1080));
    }

    #[test]
    fn presets_match_their_formats() {
        let portrait = ProjectSettings::for_format(VideoFormat::Portrait);
        assert_eq!((portrait.width, portrait.height), (1080, 1920));
        let square = ProjectSettings::for_format(VideoFormat::Square);
        assert!((square.aspect_ratio() - 1.0).abs() < 1e-9);

        for preset in FORMAT_PRESETS {
            assert_eq!(preset.format.preset().label, preset.label);
        }
    }

    #[test]
    fn serialises_format_in_lowercase() {
        let settings = ProjectSettings::for_format(VideoFormat::Square);
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"square\""));
    }
}
