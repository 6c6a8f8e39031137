//! Tempo - Playback Queue & Transport
//!
//! Platform-agnostic playback engine for the Tempo media player.
//!
//! This crate provides:
//! - Dual-order play queue (canonical + shuffled, kept in lockstep)
//! - Queue mutation while playing (play next, remove, reorder)
//! - Shuffle and repeat semantics (Off, All, One)
//! - Player visibility (hidden / minimized / expanded)
//! - Transport binding to a single media stream
//!
//! # Architecture
//!
//! `tempo-playback` never touches a real audio device. The engine drives a
//! [`MediaSource`] (an HTML audio element in the browser, a fake in tests) and
//! learns what happened to it through [`SourceEvent`]s. Views read state via
//! [`PlaybackEngine::snapshot`] and [`PlaybackEngine::drain_events`].
//!
//! The browser binding lives behind the `wasm` feature.
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{MediaId, MediaItem};
//! use tempo_playback::{MediaSource, PlaybackConfig, PlaybackEngine, Result, SourceEvent};
//!
//! #[derive(Default)]
//! struct SilentSource {
//!     time: f64,
//!     paused: bool,
//!     volume: f64,
//!     muted: bool,
//! }
//!
//! impl MediaSource for SilentSource {
//!     fn load(&mut self, _src: &str) -> Result<()> {
//!         self.time = 0.0;
//!         Ok(())
//!     }
//!     fn play(&mut self) { self.paused = false; }
//!     fn pause(&mut self) { self.paused = true; }
//!     fn unload(&mut self) { self.paused = true; }
//!     fn seek(&mut self, time: f64) { self.time = time; }
//!     fn current_time(&self) -> f64 { self.time }
//!     fn is_paused(&self) -> bool { self.paused }
//!     fn volume(&self) -> f64 { self.volume }
//!     fn set_volume(&mut self, volume: f64) { self.volume = volume; }
//!     fn is_muted(&self) -> bool { self.muted }
//!     fn set_muted(&mut self, muted: bool) { self.muted = muted; }
//! }
//!
//! let mut engine = PlaybackEngine::new(SilentSource::default(), PlaybackConfig::default());
//!
//! let album: Vec<MediaItem> = (1..=3)
//!     .map(|n| {
//!         let src = format!("/media/{}.mp3", n);
//!         MediaItem::new(MediaId::new(n), format!("Track {}", n), "Artist", src)
//!     })
//!     .collect();
//!
//! engine.select_track(album[1].clone(), Some(album.clone()));
//! assert_eq!(engine.current_queue_index(), Some(1));
//!
//! // The source reports the end of the track; the engine advances
//! engine.handle_source_event(SourceEvent::Ended);
//! assert_eq!(engine.current_track().map(|t| t.id), Some(MediaId::new(3)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod events;
mod queue;
mod shuffle;
mod source;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use crate::config::PlaybackConfig;
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::{EngineEvent, SourceEvent};
pub use queue::{PlayQueue, QueueOrder};
pub use source::MediaSource;
pub use types::{PlayerSnapshot, RepeatMode, TransportState, Visibility};
