//! Tempo Core
//!
//! Platform-agnostic media types and error handling for Tempo.
//!
//! This crate provides the values the catalog hands to the playback engine:
//! - **Media**: `MediaItem`, `MediaId`, `MediaKind`
//! - **Playlists**: user-assembled id lists that resolve into queue contexts
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{MediaId, MediaItem, Playlist, PlaylistId};
//!
//! let song = MediaItem::new(MediaId::new(3), "Cinematic Ambience", "SoundHelix", "/media/1.mp3");
//!
//! let mut playlist = Playlist::new(PlaylistId::new(1), "Evening");
//! playlist.add(song.id);
//!
//! let context = playlist.resolve(&[song]);
//! assert_eq!(context.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{
    remove_media_everywhere, MediaId, MediaItem, MediaKind, Playlist, PlaylistId,
    LIKED_SONGS_PLAYLIST_ID,
};
