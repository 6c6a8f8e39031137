mod ids;
mod media;
mod playlist;

pub use ids::{MediaId, PlaylistId};
pub use media::{MediaItem, MediaKind};
pub use playlist::{remove_media_everywhere, Playlist, LIKED_SONGS_PLAYLIST_ID};
