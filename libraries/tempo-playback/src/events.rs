//! Playback Events
//!
//! Two directions of event-based communication:
//! - `SourceEvent`: what the media source observed, fed into the engine
//! - `EngineEvent`: what changed in the engine, drained by views

use serde::{Deserialize, Serialize};
use tempo_core::MediaId;

use crate::types::{RepeatMode, Visibility};

/// Events raised by the media source
///
/// The engine's only input from the transport; see
/// [`PlaybackEngine::handle_source_event`](crate::PlaybackEngine::handle_source_event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceEvent {
    /// Playback started or resumed
    Playing,

    /// Playback paused
    Paused,

    /// Playhead moved
    TimeUpdate {
        /// Playhead in seconds
        current_time: f64,
    },

    /// Metadata for the loaded track is available
    LoadedMetadata {
        /// Track length in seconds
        duration: f64,
    },

    /// Volume or mute flag changed
    VolumeChange {
        /// Linear volume, 0.0..=1.0
        volume: f64,
        /// Mute flag
        muted: bool,
    },

    /// Track reached its end
    Ended,

    /// A `play()` request was refused (autoplay policy, decode error)
    PlayRejected {
        /// Reason reported by the source
        reason: String,
    },
}

/// Events emitted by the engine for UI synchronization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Current track changed (including to none on close)
    TrackChanged {
        /// ID of the new (current) track
        track_id: Option<MediaId>,
        /// ID of the previous track (if any)
        previous_track_id: Option<MediaId>,
    },

    /// Queue contents, order, or current index changed
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Player surface changed
    VisibilityChanged {
        /// New visibility
        visibility: Visibility,
    },

    /// Shuffle flag flipped
    ShuffleChanged {
        /// New shuffle flag
        is_shuffling: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    /// Playing/paused state changed
    PlayingChanged {
        /// Whether audio is playing
        is_playing: bool,
    },

    /// Position or duration update
    PositionUpdate {
        /// Playhead in seconds
        current_time: f64,
        /// Track length in seconds
        duration: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// Linear volume, 0.0..=1.0
        volume: f64,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Recoverable error (rejected playback, failed load)
    Error {
        /// Error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_event_serializes_externally_tagged() {
        let event = EngineEvent::VisibilityChanged {
            visibility: Visibility::Minimized,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["VisibilityChanged"]["visibility"], "minimized");
    }

    #[test]
    fn track_changed_carries_numeric_ids() {
        let event = EngineEvent::TrackChanged {
            track_id: Some(MediaId::new(4)),
            previous_track_id: None,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["TrackChanged"]["track_id"], 4);
        assert!(value["TrackChanged"]["previous_track_id"].is_null());
    }

    #[test]
    fn source_event_round_trips() {
        let event = SourceEvent::PlayRejected {
            reason: "NotAllowedError".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SourceEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
