//! Platform-agnostic media source trait
//!
//! Abstracts the single playable resource the engine drives (an HTML audio
//! element in the browser, a fake in tests).

use crate::error::Result;

/// Single-stream media transport
///
/// The engine owns exactly one source and is its only driver. Everything the
/// source observes (playhead, duration, volume changes, end of track, a
/// rejected `play()`) flows back to the engine as a
/// [`SourceEvent`](crate::SourceEvent) via
/// [`PlaybackEngine::handle_source_event`](crate::PlaybackEngine::handle_source_event).
#[cfg_attr(test, mockall::automock)]
pub trait MediaSource {
    /// Point the source at a new locator
    ///
    /// Synchronous failures (bad locator, detached element) are returned here.
    fn load(&mut self, src: &str) -> Result<()>;

    /// Start or resume playback
    ///
    /// Fire-and-forget: playback may be refused later (autoplay policy,
    /// decode error), which is reported as `SourceEvent::PlayRejected`.
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Drop the current locator entirely
    fn unload(&mut self);

    /// Move the playhead (seconds)
    fn seek(&mut self, time: f64);

    /// Current playhead (seconds)
    fn current_time(&self) -> f64;

    /// Check if the source is paused (or has nothing loaded)
    fn is_paused(&self) -> bool;

    /// Linear volume, 0.0..=1.0
    fn volume(&self) -> f64;

    /// Set linear volume
    fn set_volume(&mut self, volume: f64);

    /// Check if muted
    fn is_muted(&self) -> bool;

    /// Mute or unmute (volume level is preserved)
    fn set_muted(&mut self, muted: bool);
}
