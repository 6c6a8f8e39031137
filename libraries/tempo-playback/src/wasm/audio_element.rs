//! `MediaSource` backed by an `HtmlAudioElement`

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlAudioElement};

use crate::{MediaSource, PlaybackError, Result, SourceEvent};

type Pump = Box<dyn Fn(&Inbox)>;

/// Deferred queue of source events
///
/// Element listeners never call into the engine directly. They push here,
/// and the pump (installed by the owner of the engine) applies queued events
/// once the engine is free. Events raised while an engine operation is
/// running stay queued until that operation finishes.
#[derive(Clone, Default)]
pub struct Inbox {
    events: Rc<RefCell<VecDeque<SourceEvent>>>,
    pump: Rc<RefCell<Option<Pump>>>,
}

impl Inbox {
    /// Create new empty inbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event and try to apply it right away
    pub fn push(&self, event: SourceEvent) {
        self.events.borrow_mut().push_back(event);

        if let Ok(pump) = self.pump.try_borrow() {
            if let Some(pump) = pump.as_ref() {
                pump(self);
            }
        }
    }

    /// Take the oldest queued event
    pub fn pop(&self) -> Option<SourceEvent> {
        self.events.borrow_mut().pop_front()
    }

    /// Install the function that applies queued events
    pub fn set_pump(&self, pump: impl Fn(&Inbox) + 'static) {
        *self.pump.borrow_mut() = Some(Box::new(pump));
    }
}

struct Listener {
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Audio element transport
///
/// Listeners are attached on construction and removed on drop.
pub struct HtmlAudioSource {
    element: HtmlAudioElement,
    inbox: Inbox,
    listeners: Vec<Listener>,
    on_rejected: Closure<dyn FnMut(JsValue)>,
}

impl HtmlAudioSource {
    /// Create a detached `<audio>` element and wire its listeners
    pub fn new(inbox: Inbox) -> Result<Self> {
        let element = HtmlAudioElement::new().map_err(js_error)?;
        Self::with_element(element, inbox)
    }

    /// Wrap an existing `<audio>` element
    pub fn with_element(element: HtmlAudioElement, inbox: Inbox) -> Result<Self> {
        let on_rejected = {
            let inbox = inbox.clone();
            Closure::wrap(Box::new(move |reason: JsValue| {
                inbox.push(SourceEvent::PlayRejected {
                    reason: describe(&reason),
                });
            }) as Box<dyn FnMut(JsValue)>)
        };

        let mut source = Self {
            element,
            inbox,
            listeners: Vec::new(),
            on_rejected,
        };

        source.listen("play", |_| Some(SourceEvent::Playing))?;
        source.listen("pause", |_| Some(SourceEvent::Paused))?;
        source.listen("ended", |_| Some(SourceEvent::Ended))?;
        source.listen("timeupdate", |element| {
            Some(SourceEvent::TimeUpdate {
                current_time: element.current_time(),
            })
        })?;
        source.listen("loadedmetadata", |element| {
            // Live streams report an infinite duration
            let duration = element.duration();
            Some(SourceEvent::LoadedMetadata {
                duration: if duration.is_finite() { duration } else { 0.0 },
            })
        })?;
        source.listen("volumechange", |element| {
            Some(SourceEvent::VolumeChange {
                volume: element.volume(),
                muted: element.muted(),
            })
        })?;

        Ok(source)
    }

    /// The underlying element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    fn listen(
        &mut self,
        event: &'static str,
        map: impl Fn(&HtmlAudioElement) -> Option<SourceEvent> + 'static,
    ) -> Result<()> {
        let element = self.element.clone();
        let inbox = self.inbox.clone();
        let callback = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(source_event) = map(&element) {
                inbox.push(source_event);
            }
        }) as Box<dyn FnMut(Event)>);

        let target: &EventTarget = self.element.as_ref();
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;

        self.listeners.push(Listener { event, callback });
        Ok(())
    }
}

impl MediaSource for HtmlAudioSource {
    fn load(&mut self, src: &str) -> Result<()> {
        if src.is_empty() {
            return Err(PlaybackError::MediaSource("empty media locator".to_string()));
        }
        debug!("Audio element src = {}", src);
        self.element.set_src(src);
        Ok(())
    }

    fn play(&mut self) {
        match self.element.play() {
            Ok(promise) => {
                // Rejections come back through the inbox
                let _ = promise.catch(&self.on_rejected);
            }
            Err(e) => self.inbox.push(SourceEvent::PlayRejected {
                reason: describe(&e),
            }),
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            warn!("Failed to pause audio element: {}", describe(&e));
        }
    }

    fn unload(&mut self) {
        self.element.set_src("");
    }

    fn seek(&mut self, time: f64) {
        self.element.set_current_time(time);
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn set_volume(&mut self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn is_muted(&self) -> bool {
        self.element.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }
}

impl Drop for HtmlAudioSource {
    fn drop(&mut self) {
        let target: &EventTarget = self.element.as_ref();
        for listener in &self.listeners {
            let _ = target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        let _ = self.element.pause();
        self.element.set_src("");
    }
}

fn js_error(value: JsValue) -> PlaybackError {
    PlaybackError::MediaSource(describe(&value))
}

fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
