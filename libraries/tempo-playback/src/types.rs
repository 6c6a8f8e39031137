//! Core types for playback management

use serde::{Deserialize, Serialize};
use tempo_core::MediaItem;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: off → all → one → off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Which player surface is shown
///
/// ```text
/// hidden ──select──▶ expanded ◀──expand── minimized
///   │                   │  ──minimize──▶      ▲
///   └──────add (fresh queue)──────────────────┘
/// any ──close──▶ hidden
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// No current track, source unloaded
    #[default]
    Hidden,

    /// Compact controls only
    Minimized,

    /// Full playback surface
    Expanded,
}

/// Mirror of the media source's transport
///
/// Written only from source events (and reset on close).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportState {
    /// Whether audio is playing
    pub is_playing: bool,

    /// Playhead in seconds
    pub current_time: f64,

    /// Track length in seconds (0 until metadata loads)
    pub duration: f64,

    /// Linear volume, 0.0..=1.0
    pub volume: f64,

    /// Whether audio is muted
    pub is_muted: bool,
}

impl TransportState {
    pub(crate) fn new(volume: f64) -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume,
            is_muted: false,
        }
    }
}

/// Everything a view renders, in one serializable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Track at the current index, if any
    pub current_track: Option<MediaItem>,
    /// Whether the source is playing
    pub is_playing: bool,
    /// Playback position in seconds
    pub current_time: f64,
    /// Track length in seconds
    pub duration: f64,
    /// Volume in `0.0..=1.0`
    pub volume: f64,
    /// Whether output is muted
    pub is_muted: bool,
    /// Repeat mode at the queue ends
    pub repeat_mode: RepeatMode,
    /// Whether the shuffled order is active
    pub is_shuffling: bool,
    /// Canonical order
    pub play_queue: Vec<MediaItem>,
    /// Shuffled order, same members as `play_queue`
    pub shuffled_queue: Vec<MediaItem>,
    /// Position of the current track in the active order
    pub current_queue_index: Option<usize>,
    /// Whether `next_track` would move
    pub is_next_available: bool,
    /// Whether `previous_track` would move
    pub is_previous_available: bool,
    /// Player view state
    pub visibility: Visibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycles_off_all_one() {
        assert_eq!(RepeatMode::Off.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::Off);
    }

    #[test]
    fn defaults() {
        assert_eq!(RepeatMode::default(), RepeatMode::Off);
        assert_eq!(Visibility::default(), Visibility::Hidden);

        let transport = TransportState::new(0.8);
        assert!(!transport.is_playing);
        assert_eq!(transport.volume, 0.8);
    }
}
