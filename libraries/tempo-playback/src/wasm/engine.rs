//! WASM-compatible PlaybackEngine wrapper

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Function, Reflect};
use serde::de::DeserializeOwned;
use tempo_core::{MediaId, MediaItem};
use tracing::debug;
use wasm_bindgen::prelude::*;

use super::audio_element::{HtmlAudioSource, Inbox};
use crate::{EngineEvent, PlaybackConfig, PlaybackEngine};

type Engine = PlaybackEngine<HtmlAudioSource>;

/// Registered JavaScript callbacks
#[derive(Clone, Default)]
struct Callbacks {
    on_state_change: Option<Function>,
    on_track_change: Option<Function>,
    on_queue_change: Option<Function>,
    on_error: Option<Function>,
}

/// Everything a batch of engine events should tell JavaScript
///
/// Built while the engine is borrowed, delivered after the borrow is
/// released so callbacks may call back into the engine.
struct Notifications {
    state: JsValue,
    track: Option<JsValue>,
    queue_changed: bool,
    errors: Vec<String>,
}

impl Notifications {
    fn collect(engine: &Engine, events: Vec<EngineEvent>) -> Self {
        let mut notifications = Self {
            state: state_to_js(engine),
            track: None,
            queue_changed: false,
            errors: Vec::new(),
        };

        for event in events {
            match event {
                EngineEvent::TrackChanged { .. } => {
                    notifications.track = Some(
                        engine
                            .current_track()
                            .and_then(|track| serde_wasm_bindgen::to_value(track).ok())
                            .unwrap_or(JsValue::NULL),
                    );
                }
                EngineEvent::QueueChanged { .. } | EngineEvent::ShuffleChanged { .. } => {
                    notifications.queue_changed = true;
                }
                EngineEvent::Error { message } => notifications.errors.push(message),
                _ => {}
            }
        }

        notifications
    }

    fn deliver(self, callbacks: &Callbacks) {
        if let Some(ref cb) = callbacks.on_state_change {
            cb.call1(&JsValue::NULL, &self.state).ok();
        }

        if let (Some(cb), Some(track)) = (&callbacks.on_track_change, &self.track) {
            cb.call1(&JsValue::NULL, track).ok();
        }

        if self.queue_changed {
            if let Some(ref cb) = callbacks.on_queue_change {
                cb.call0(&JsValue::NULL).ok();
            }
        }

        for message in self.errors {
            match callbacks.on_error {
                Some(ref cb) => {
                    cb.call1(&JsValue::NULL, &JsValue::from_str(&message)).ok();
                }
                None => web_sys::console::warn_1(&JsValue::from_str(&message)),
            }
        }
    }
}

/// Apply queued source events and notify JavaScript of what changed
///
/// Does nothing while the engine is borrowed; the operation holding the
/// borrow flushes once it is done.
fn flush(engine: &RefCell<Engine>, callbacks: &RefCell<Callbacks>, inbox: &Inbox) {
    let notifications = {
        let Ok(mut engine) = engine.try_borrow_mut() else {
            return;
        };

        while let Some(event) = inbox.pop() {
            engine.handle_source_event(event);
        }

        let events = engine.drain_events();
        if events.is_empty() {
            return;
        }
        Notifications::collect(&engine, events)
    };

    let callbacks = callbacks.borrow().clone();
    notifications.deliver(&callbacks);
}

fn state_to_js(engine: &Engine) -> JsValue {
    let snapshot = engine.snapshot();
    let Ok(state) = serde_wasm_bindgen::to_value(&snapshot) else {
        return JsValue::NULL;
    };

    // JavaScript views expect -1 and null for "no current track"
    let index = snapshot
        .current_queue_index
        .map_or(-1.0, |index| index as f64);
    Reflect::set(
        &state,
        &JsValue::from_str("currentQueueIndex"),
        &JsValue::from_f64(index),
    )
    .ok();
    if snapshot.current_track.is_none() {
        Reflect::set(&state, &JsValue::from_str("currentTrack"), &JsValue::NULL).ok();
    }
    state
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

/// WASM-compatible playback engine
///
/// This wraps the core PlaybackEngine around an `<audio>` element with a
/// JavaScript-friendly API.
#[wasm_bindgen]
pub struct WasmPlaybackEngine {
    engine: Rc<RefCell<Engine>>,
    callbacks: Rc<RefCell<Callbacks>>,
    inbox: Inbox,
}

impl WasmPlaybackEngine {
    /// Run an engine operation, then notify JavaScript
    fn apply(&self, operation: impl FnOnce(&mut Engine)) {
        operation(&mut *self.engine.borrow_mut());
        flush(&self.engine, &self.callbacks, &self.inbox);
    }
}

#[wasm_bindgen]
impl WasmPlaybackEngine {
    /// Create a new playback engine
    ///
    /// `config` is an optional partial `PlaybackConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPlaybackEngine, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            from_js(config, "config")?
        };
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let inbox = Inbox::new();
        let source =
            HtmlAudioSource::new(inbox.clone()).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let engine = Rc::new(RefCell::new(PlaybackEngine::new(source, config)));
        let callbacks = Rc::new(RefCell::new(Callbacks::default()));

        let weak_engine: Weak<RefCell<Engine>> = Rc::downgrade(&engine);
        let weak_callbacks: Weak<RefCell<Callbacks>> = Rc::downgrade(&callbacks);
        inbox.set_pump(move |inbox| {
            let engine = weak_engine.upgrade();
            let callbacks = weak_callbacks.upgrade();
            if let (Some(engine), Some(callbacks)) = (engine, callbacks) {
                flush(&engine, &callbacks, inbox);
            }
        });

        Ok(Self {
            engine,
            callbacks,
            inbox,
        })
    }

    // ===== Queue Operations =====

    /// Play a media item, optionally with the list it was picked from
    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&self, item: JsValue, queue_context: JsValue) -> Result<(), JsValue> {
        let item: MediaItem = from_js(item, "media item")?;
        let no_context = queue_context.is_undefined() || queue_context.is_null();
        let context: Option<Vec<MediaItem>> = if no_context {
            None
        } else {
            Some(from_js(queue_context, "queue context")?)
        };

        self.apply(|engine| engine.select_track(item, context));
        Ok(())
    }

    /// Queue a media item to play next
    #[wasm_bindgen(js_name = addToQueue)]
    pub fn add_to_queue(&self, item: JsValue) -> Result<(), JsValue> {
        let item: MediaItem = from_js(item, "media item")?;
        self.apply(|engine| engine.add_to_queue(item));
        Ok(())
    }

    /// Remove a media item from the queue by id
    #[wasm_bindgen(js_name = removeFromQueue)]
    pub fn remove_from_queue(&self, media_id: JsValue) -> Result<(), JsValue> {
        let media_id: MediaId = from_js(media_id, "media id")?;
        self.apply(|engine| engine.remove_from_queue(media_id));
        Ok(())
    }

    /// Move a queue entry within the active order
    #[wasm_bindgen(js_name = reorderQueue)]
    pub fn reorder_queue(&self, from_index: usize, to_index: usize) {
        self.apply(|engine| engine.reorder_queue(from_index, to_index));
    }

    /// Get the queue in canonical order
    #[wasm_bindgen(js_name = getPlayQueue)]
    pub fn get_play_queue(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.engine.borrow().play_queue()).unwrap_or(JsValue::NULL)
    }

    /// Get the queue in shuffled order
    #[wasm_bindgen(js_name = getShuffledQueue)]
    pub fn get_shuffled_queue(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.engine.borrow().shuffled_queue()).unwrap_or(JsValue::NULL)
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&self) {
        self.apply(Engine::toggle_shuffle);
    }

    /// Cycle repeat mode (off → all → one)
    #[wasm_bindgen(js_name = toggleRepeat)]
    pub fn toggle_repeat(&self) {
        self.apply(Engine::toggle_repeat);
    }

    // ===== Navigation =====

    /// Skip to next track
    #[wasm_bindgen(js_name = nextTrack)]
    pub fn next_track(&self) {
        self.apply(Engine::next_track);
    }

    /// Go to previous track (or restart the current one)
    #[wasm_bindgen(js_name = previousTrack)]
    pub fn previous_track(&self) {
        self.apply(Engine::previous_track);
    }

    // ===== Transport =====

    /// Play or pause
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) {
        self.apply(|engine| {
            if let Err(e) = engine.toggle_play_pause() {
                debug!("togglePlayPause ignored: {}", e);
            }
        });
    }

    /// Seek to position in seconds
    pub fn seek(&self, time: f64) {
        self.apply(|engine| {
            if let Err(e) = engine.seek(time) {
                debug!("seek ignored: {}", e);
            }
        });
    }

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f64) {
        self.apply(|engine| engine.set_volume(volume));
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.apply(Engine::toggle_mute);
    }

    // ===== Visibility =====

    /// Show the compact player
    #[wasm_bindgen(js_name = minimizePlayer)]
    pub fn minimize_player(&self) {
        self.apply(Engine::minimize_player);
    }

    /// Show the full player
    #[wasm_bindgen(js_name = expandPlayer)]
    pub fn expand_player(&self) {
        self.apply(Engine::expand_player);
    }

    /// Stop playback and hide the player
    #[wasm_bindgen(js_name = closePlayer)]
    pub fn close_player(&self) {
        self.apply(Engine::close_player);
    }

    // ===== State Queries =====

    /// Get all observable state as a plain object
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        state_to_js(&self.engine.borrow())
    }

    /// Get current track, or null
    #[wasm_bindgen(js_name = getCurrentTrack)]
    pub fn get_current_track(&self) -> JsValue {
        self.engine
            .borrow()
            .current_track()
            .and_then(|track| serde_wasm_bindgen::to_value(track).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Index into the active queue, -1 when nothing is current
    #[wasm_bindgen(js_name = currentQueueIndex)]
    pub fn current_queue_index(&self) -> i32 {
        self.engine
            .borrow()
            .current_queue_index()
            .and_then(|index| i32::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// Check if there is a next track
    #[wasm_bindgen(js_name = isNextAvailable)]
    pub fn is_next_available(&self) -> bool {
        self.engine.borrow().is_next_available()
    }

    /// Check if there is a previous track
    #[wasm_bindgen(js_name = isPreviousAvailable)]
    pub fn is_previous_available(&self) -> bool {
        self.engine.borrow().is_previous_available()
    }

    // ===== Event Listeners =====

    /// Register state change callback, called with `getState()`
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&self, callback: Function) {
        self.callbacks.borrow_mut().on_state_change = Some(callback);
    }

    /// Register track change callback, called with the track or null
    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn on_track_change(&self, callback: Function) {
        self.callbacks.borrow_mut().on_track_change = Some(callback);
    }

    /// Register queue change callback
    #[wasm_bindgen(js_name = onQueueChange)]
    pub fn on_queue_change(&self, callback: Function) {
        self.callbacks.borrow_mut().on_queue_change = Some(callback);
    }

    /// Register error callback, called with a message
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&self, callback: Function) {
        self.callbacks.borrow_mut().on_error = Some(callback);
    }
}
