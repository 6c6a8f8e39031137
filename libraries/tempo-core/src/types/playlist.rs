/// Playlist domain types
use crate::error::{CoreError, Result};
use crate::types::{MediaId, MediaItem, PlaylistId};
use serde::{Deserialize, Serialize};

/// Reserved playlist holding the user's liked songs
pub const LIKED_SONGS_PLAYLIST_ID: PlaylistId = PlaylistId::new(0);

/// User-assembled list of media
///
/// Stores ids only; `resolve` turns it into a queue context against the
/// current catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Media ids in playlist order
    #[serde(default)]
    pub media_ids: Vec<MediaId>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            media_ids: Vec::new(),
        }
    }

    /// Create the reserved "Liked Songs" playlist
    pub fn liked_songs() -> Self {
        Self::new(LIKED_SONGS_PLAYLIST_ID, "Liked Songs")
    }

    /// Check if this is the reserved "Liked Songs" playlist
    pub fn is_liked_songs(&self) -> bool {
        self.id == LIKED_SONGS_PLAYLIST_ID
    }

    /// Rename the playlist
    ///
    /// Blank names are rejected.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::invalid_input("playlist name cannot be blank"));
        }
        self.name = name;
        Ok(())
    }

    /// Append media to the playlist
    ///
    /// Returns false if it was already present.
    pub fn add(&mut self, media_id: MediaId) -> bool {
        if self.contains(media_id) {
            return false;
        }
        self.media_ids.push(media_id);
        true
    }

    /// Remove media from the playlist
    ///
    /// Returns false if it was not present.
    pub fn remove(&mut self, media_id: MediaId) -> bool {
        let before = self.media_ids.len();
        self.media_ids.retain(|id| *id != media_id);
        self.media_ids.len() != before
    }

    /// Check if the playlist contains media
    pub fn contains(&self, media_id: MediaId) -> bool {
        self.media_ids.contains(&media_id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.media_ids.len()
    }

    /// Check if the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.media_ids.is_empty()
    }

    /// Resolve into a queue context, in playlist order
    ///
    /// Ids missing from `catalog` are skipped.
    pub fn resolve(&self, catalog: &[MediaItem]) -> Vec<MediaItem> {
        self.media_ids
            .iter()
            .filter_map(|id| catalog.iter().find(|item| item.id == *id))
            .cloned()
            .collect()
    }

    /// Find a playlist by id
    pub fn find(playlists: &[Playlist], id: PlaylistId) -> Result<&Playlist> {
        playlists
            .iter()
            .find(|playlist| playlist.id == id)
            .ok_or_else(|| CoreError::not_found("Playlist", id.to_string()))
    }
}

/// Remove media from every playlist (library deletion)
///
/// Returns how many playlists changed.
pub fn remove_media_everywhere(playlists: &mut [Playlist], media_id: MediaId) -> usize {
    playlists
        .iter_mut()
        .map(|playlist| playlist.remove(media_id))
        .filter(|changed| *changed)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64) -> MediaItem {
        MediaItem::new(MediaId::new(id), format!("Song {}", id), "Artist", format!("{}.mp3", id))
    }

    #[test]
    fn add_is_deduplicating() {
        let mut playlist = Playlist::new(PlaylistId::new(1), "Road Trip");

        assert!(playlist.add(MediaId::new(3)));
        assert!(!playlist.add(MediaId::new(3)));
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn remove_reports_change() {
        let mut playlist = Playlist::new(PlaylistId::new(1), "Road Trip");
        playlist.add(MediaId::new(3));

        assert!(playlist.remove(MediaId::new(3)));
        assert!(!playlist.remove(MediaId::new(3)));
        assert!(playlist.is_empty());
    }

    #[test]
    fn rename_rejects_blank_names() {
        let mut playlist = Playlist::new(PlaylistId::new(1), "Road Trip");

        assert!(playlist.rename("   ").is_err());
        assert_eq!(playlist.name, "Road Trip");

        playlist.rename("Night Drive").unwrap();
        assert_eq!(playlist.name, "Night Drive");
    }

    #[test]
    fn resolve_keeps_playlist_order_and_skips_missing() {
        let catalog = vec![item(1), item(2), item(3)];
        let mut playlist = Playlist::new(PlaylistId::new(1), "Mix");
        playlist.add(MediaId::new(3));
        playlist.add(MediaId::new(99));
        playlist.add(MediaId::new(1));

        let ids: Vec<u64> = playlist.resolve(&catalog).iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn liked_songs_is_reserved() {
        let liked = Playlist::liked_songs();
        assert!(liked.is_liked_songs());
        assert!(!Playlist::new(PlaylistId::new(7), "Other").is_liked_songs());
    }

    #[test]
    fn library_deletion_cascades() {
        let mut playlists = vec![Playlist::liked_songs(), Playlist::new(PlaylistId::new(1), "Mix")];
        playlists[0].add(MediaId::new(5));
        playlists[1].add(MediaId::new(5));
        playlists[1].add(MediaId::new(6));

        assert_eq!(remove_media_everywhere(&mut playlists, MediaId::new(5)), 2);
        assert!(playlists.iter().all(|p| !p.contains(MediaId::new(5))));
        assert_eq!(playlists[1].media_ids, vec![MediaId::new(6)]);
    }

    #[test]
    fn find_reports_missing_playlist() {
        let playlists = vec![Playlist::liked_songs()];

        assert!(Playlist::find(&playlists, LIKED_SONGS_PLAYLIST_ID).is_ok());
        let err = Playlist::find(&playlists, PlaylistId::new(4)).unwrap_err();
        assert_eq!(err.to_string(), "Playlist not found: 4");
    }
}
