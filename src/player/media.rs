//! The media element capability consumed by the controller. The trait keeps
//! the state machine testable off-browser; the wasm implementation wraps a
//! single `HtmlAudioElement` owned for the player's whole lifetime instead
//! of an ambient lazily-created one, so listeners are attached exactly once
//! and torn down by a drop guard.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::warn;
#[cfg(target_arch = "wasm32")]
use dioxus::prelude::spawn;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

/// Lifecycle events bridged from the media element into the controller.
/// `PlayOutcome` is the asynchronous resolution of a `begin_play` request,
/// tagged with the epoch it was issued under so stale resolutions for a
/// superseded track can be discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    LoadStart,
    CanPlay,
    LoadedMetadata { duration: f64 },
    TimeUpdate { seconds: f64 },
    Started,
    Stopped,
    Ended,
    Failed,
    PlayOutcome { epoch: u64, ok: bool },
}

/// Commands the controller issues to the media element. All calls return
/// immediately; outcomes and progress arrive back as [`MediaEvent`]s.
pub trait MediaBackend {
    fn load(&mut self, src: &str);
    /// Requests playback. Resolution is reported later as
    /// `MediaEvent::PlayOutcome { epoch, .. }`.
    fn begin_play(&mut self, epoch: u64);
    fn pause(&mut self);
    fn set_position(&mut self, seconds: f64);
    fn set_volume(&mut self, level: f64);
    fn set_rate(&mut self, rate: f64);
}

/// Single-consumer event channel between the media element and whoever owns
/// the controller. The handler slot is cleared on teardown so late events
/// from an abandoned element go nowhere.
#[derive(Clone, Default)]
pub struct EventBus {
    handler: Rc<RefCell<Option<Box<dyn FnMut(MediaEvent)>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect<F: FnMut(MediaEvent) + 'static>(&self, handler: F) {
        *self.handler.borrow_mut() = Some(Box::new(handler));
    }

    pub fn disconnect(&self) {
        self.handler.borrow_mut().take();
    }

    pub fn emit(&self, event: MediaEvent) {
        if let Some(handler) = self.handler.borrow_mut().as_mut() {
            handler(event);
        }
    }
}

/// A backend that failed to materialize behaves as an absent one; the
/// state machine still runs, nothing audible happens.
impl<M: MediaBackend> MediaBackend for Option<M> {
    fn load(&mut self, src: &str) {
        if let Some(media) = self {
            media.load(src);
        }
    }
    fn begin_play(&mut self, epoch: u64) {
        if let Some(media) = self {
            media.begin_play(epoch);
        }
    }
    fn pause(&mut self) {
        if let Some(media) = self {
            media.pause();
        }
    }
    fn set_position(&mut self, seconds: f64) {
        if let Some(media) = self {
            media.set_position(seconds);
        }
    }
    fn set_volume(&mut self, level: f64) {
        if let Some(media) = self {
            media.set_volume(level);
        }
    }
    fn set_rate(&mut self, rate: f64) {
        if let Some(media) = self {
            media.set_rate(rate);
        }
    }
}

/// Inert backend for non-wasm builds; the controller logic still runs,
/// nothing audible happens.
#[derive(Debug, Default)]
pub struct NullMedia;

impl MediaBackend for NullMedia {
    fn load(&mut self, _src: &str) {}
    fn begin_play(&mut self, _epoch: u64) {}
    fn pause(&mut self) {}
    fn set_position(&mut self, _seconds: f64) {}
    fn set_volume(&mut self, _level: f64) {}
    fn set_rate(&mut self, _rate: f64) {}
}

#[cfg(target_arch = "wasm32")]
const AUDIO_ELEMENT_ID: &str = "resonance-audio";

/// Removes the registered DOM listeners when dropped. Keeping the closures
/// here (instead of `forget`) is what makes re-mounting the player safe:
/// no duplicate listeners can accumulate.
#[cfg(target_arch = "wasm32")]
struct MediaListeners {
    audio: HtmlAudioElement,
    closures: Vec<(&'static str, Closure<dyn FnMut(web_sys::Event)>)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for MediaListeners {
    fn drop(&mut self) {
        for (name, closure) in &self.closures {
            let _ = self
                .audio
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

/// The one audio element per player instance, exclusively owned by the
/// controller.
#[cfg(target_arch = "wasm32")]
pub struct WebMedia {
    audio: HtmlAudioElement,
    bus: EventBus,
    _listeners: MediaListeners,
}

#[cfg(target_arch = "wasm32")]
impl WebMedia {
    /// Creates the audio element, appends it to the document body and wires
    /// every lifecycle listener once.
    pub fn create(bus: EventBus) -> Option<Self> {
        let document = window()?.document()?;

        // A stale element from a previous session (hot reload) is replaced,
        // never reused: its listeners are gone.
        if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
            existing.remove();
        }

        let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
        audio.set_id(AUDIO_ELEMENT_ID);
        audio.set_attribute("preload", "metadata").ok()?;
        document.body()?.append_child(&audio).ok()?;

        let listeners = Self::attach_listeners(&audio, &bus);
        Some(Self {
            audio,
            bus,
            _listeners: listeners,
        })
    }

    pub fn audio(&self) -> &HtmlAudioElement {
        &self.audio
    }

    fn attach_listeners(audio: &HtmlAudioElement, bus: &EventBus) -> MediaListeners {
        let mut closures = Vec::new();

        let mut listen = |name: &'static str, callback: Box<dyn FnMut(web_sys::Event)>| {
            let closure = Closure::wrap(callback);
            let _ = audio.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closures.push((name, closure));
        };

        {
            let bus = bus.clone();
            listen(
                "loadstart",
                Box::new(move |_| bus.emit(MediaEvent::LoadStart)),
            );
        }
        {
            let bus = bus.clone();
            listen("canplay", Box::new(move |_| bus.emit(MediaEvent::CanPlay)));
        }
        {
            let bus = bus.clone();
            let audio = audio.clone();
            listen(
                "loadedmetadata",
                Box::new(move |_| {
                    bus.emit(MediaEvent::LoadedMetadata {
                        duration: audio.duration(),
                    })
                }),
            );
        }
        {
            let bus = bus.clone();
            let audio = audio.clone();
            listen(
                "timeupdate",
                Box::new(move |_| {
                    bus.emit(MediaEvent::TimeUpdate {
                        seconds: audio.current_time(),
                    })
                }),
            );
        }
        {
            let bus = bus.clone();
            listen("ended", Box::new(move |_| bus.emit(MediaEvent::Ended)));
        }
        {
            let bus = bus.clone();
            let audio = audio.clone();
            listen(
                "error",
                Box::new(move |_| {
                    if let Some(error) = audio.error() {
                        warn!(code = error.code(), "media element reported an error");
                    }
                    bus.emit(MediaEvent::Failed)
                }),
            );
        }
        {
            let bus = bus.clone();
            listen("play", Box::new(move |_| bus.emit(MediaEvent::Started)));
        }
        {
            let bus = bus.clone();
            listen("pause", Box::new(move |_| bus.emit(MediaEvent::Stopped)));
        }

        MediaListeners {
            audio: audio.clone(),
            closures,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaBackend for WebMedia {
    fn load(&mut self, src: &str) {
        self.audio.set_src(src);
        self.audio.load();
    }

    fn begin_play(&mut self, epoch: u64) {
        let bus = self.bus.clone();
        match self.audio.play() {
            Ok(promise) => {
                spawn(async move {
                    let ok = wasm_bindgen_futures::JsFuture::from(promise).await.is_ok();
                    bus.emit(MediaEvent::PlayOutcome { epoch, ok });
                });
            }
            Err(_) => {
                // Deliver the rejection on the next tick so the emit never
                // lands inside the caller's borrow of the controller.
                spawn(async move {
                    gloo_timers::future::TimeoutFuture::new(0).await;
                    bus.emit(MediaEvent::PlayOutcome { epoch, ok: false });
                });
            }
        }
    }

    fn pause(&mut self) {
        let _ = self.audio.pause();
    }

    fn set_position(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn set_volume(&mut self, level: f64) {
        self.audio.set_volume(level);
    }

    fn set_rate(&mut self, rate: f64) {
        self.audio.set_playback_rate(rate);
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for WebMedia {
    fn drop(&mut self) {
        let _ = self.audio.pause();
        self.audio.remove();
    }
}
