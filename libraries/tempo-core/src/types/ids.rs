/// ID types for Tempo entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media item identifier
///
/// Numeric so it survives the trip through the browser unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(u64);

impl MediaId {
    /// Create a media ID from a raw value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Derive a stable ID from file properties
    ///
    /// The same file (name, size, modification time) always maps to the same
    /// ID, so a re-scanned library keeps its playlists and queue references.
    /// The key is hashed over its UTF-16 code units with `h = h * 31 + unit`
    /// in wrapping 32-bit arithmetic; the ID is the absolute value of the result.
    pub fn stable(name: &str, size: u64, last_modified: i64) -> Self {
        let key = format!("{}-{}-{}", name, size, last_modified);
        let hash = key.encode_utf16().fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        });
        Self(u64::from(hash.unsigned_abs()))
    }

    /// Get the raw value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for MediaId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playlist identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(u64);

impl PlaylistId {
    /// Create a playlist ID from a raw value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
