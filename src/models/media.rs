//! Media entity and file-name registry.

use serde::{Deserialize, Serialize};

/// An uploaded, independently addressable asset.
///
/// Created once per distinct asset and immutable thereafter, except for
/// attribution edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Opaque identifier
    pub id: String,

    /// URL the asset content is served from
    pub content_url: String,

    /// Alt text for accessibility
    pub alt_text: String,

    /// Free-text attribution (photographer, agency), if any
    #[serde(default)]
    pub attribution: Option<String>,
}

/// Registry mapping original upload file names to registered media.
///
/// Entries keep registration order: `resolve` scans them in order and the
/// first file name found anywhere inside the candidate `src` wins. When
/// one registered name is a substring of another the earlier registration
/// shadows the later one; that collision is inherited source behavior,
/// kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaIndex {
    entries: Vec<MediaEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaEntry {
    /// Original file name of the upload (e.g. "photo1.jpg")
    pub file_name: String,

    /// The registered media entity
    pub media: Media,
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a media entity under its original file name.
    ///
    /// A file name that is already registered is ignored: media is
    /// created once per distinct image.
    pub fn register(&mut self, file_name: impl Into<String>, media: Media) {
        let file_name = file_name.into();
        if self.by_file_name(&file_name).is_some() {
            log::debug!("Media already registered for {file_name}, keeping first");
            return;
        }
        self.entries.push(MediaEntry { file_name, media });
    }

    /// Look up a media entity by exact file name.
    pub fn by_file_name(&self, file_name: &str) -> Option<&Media> {
        self.entries
            .iter()
            .find(|e| e.file_name == file_name)
            .map(|e| &e.media)
    }

    /// Resolve an image `src` to a registered media entity.
    ///
    /// The exporting editor rewrites relative image paths into absolute
    /// URLs, so matching checks whether a registered file name appears
    /// anywhere in the src. First match wins.
    pub fn resolve(&self, src: &str) -> Option<&Media> {
        self.entries
            .iter()
            .find(|e| src.contains(&e.file_name))
            .map(|e| &e.media)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate registered entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &MediaEntry> {
        self.entries.iter()
    }
}
