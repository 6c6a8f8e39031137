/// Media item domain type
use crate::error::Result;
use crate::types::MediaId;
use serde::{Deserialize, Serialize};

/// Kind of playable media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Audio-only track
    #[default]
    Audio,
    /// Video with an audio stream
    Video,
}

impl MediaKind {
    /// Classify a MIME type (`audio/*` or `video/*`)
    ///
    /// Returns `None` for anything that is not playable media.
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("audio/") {
            Some(Self::Audio)
        } else if mime.starts_with("video/") {
            Some(Self::Video)
        } else {
            None
        }
    }

    /// String form used in the browser-side object shape
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

/// A playable media item
///
/// Immutable once handed to the engine. Queue operations compare items by
/// `id` only; two items with the same id are the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Unique media identifier
    pub id: MediaId,

    /// Display title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Genre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Audio or video
    #[serde(rename = "type", default)]
    pub kind: MediaKind,

    /// Playable locator handed to the media source
    pub src: String,

    /// Cover art locator
    #[serde(default)]
    pub cover_art: String,
}

impl MediaItem {
    /// Create a new audio item with minimal metadata
    pub fn new(
        id: MediaId,
        title: impl Into<String>,
        artist: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: None,
            genre: None,
            kind: MediaKind::Audio,
            src: src.into(),
            cover_art: String::new(),
        }
    }

    /// Set the album
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the genre
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the media kind
    #[must_use]
    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the cover art locator
    #[must_use]
    pub fn with_cover_art(mut self, cover_art: impl Into<String>) -> Self {
        self.cover_art = cover_art.into();
        self
    }

    /// Parse a catalog listing (a JSON array of items)
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}
