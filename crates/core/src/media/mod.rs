mod upload;

pub use upload::{classify_mime, ingest_upload, validate_upload, MediaProbe, UploadRequest};

use serde::{Deserialize, Serialize};

/// Kind of an uploaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Image,
    Video,
}

impl MediaKind {
    /// Whether the compositor can draw this kind onto the preview canvas.
    pub fn is_visual(self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }
}

/// Catalog entry describing an uploaded asset. Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Media {
    pub fn new(
        id: impl Into<String>,
        kind: MediaKind,
        url: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            url: url.into(),
            name: name.into(),
            duration: None,
            thumbnail: None,
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Ordered list of uploaded assets available for placement.
#[derive(Debug, Default, Clone)]
pub struct MediaCatalog {
    entries: Vec<Media>,
}

impl MediaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, media: Media) {
        tracing::debug!(id = %media.id, kind = ?media.kind, "media added to catalog");
        self.entries.push(media);
    }

    /// Removes the entry with the given id. Timeline items referencing it are
    /// pruned separately by the placement engine.
    pub fn remove(&mut self, id: &str) -> Option<Media> {
        let index = self.entries.iter().position(|media| media.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Media> {
        self.entries.iter().find(|media| media.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Media> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(id: &str) -> Media {
        Media::new(id, MediaKind::Image, format!("blob:{id}"), format!("{id}.png"))
    }

    #[test]
    fn keeps_insertion_order() {
        let mut catalog = MediaCatalog::new();
        catalog.add(media("a"));
        catalog.add(media("b"));

        let ids: Vec<_> = catalog.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn removes_only_the_matching_entry() {
        let mut catalog = MediaCatalog::new();
        catalog.add(media("a"));
        catalog.add(media("b"));

        assert_eq!(catalog.remove("a").map(|m| m.id), Some("a".to_string()));
        assert!(catalog.remove("missing").is_none());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("b").is_some());
    }

    #[test]
    fn serialises_kind_as_type_field() {
        let json = serde_json::to_value(media("a").with_duration(2.5)).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["duration"], 2.5);
        assert!(json.get("thumbnail").is_none());
    }
}
