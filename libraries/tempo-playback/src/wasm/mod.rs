//! WASM bindings for tempo-playback
//!
//! Drives a `PlaybackEngine` from the browser: an `<audio>` element is the
//! media source, and engine events are forwarded to JavaScript callbacks.

pub mod audio_element;
pub mod engine;

pub use audio_element::{HtmlAudioSource, Inbox};
pub use engine::WasmPlaybackEngine;
