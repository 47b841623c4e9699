//! Owns the playback controller for the whole app and bridges it into the
//! Dioxus world: media element events flow in through the event bus, state
//! snapshots flow out through a signal the views bind to, and the
//! visualizer feed is started/cancelled on phase transitions. Headless on
//! purpose; audio side-effects stay out of the render cycle.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::warn;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAudioElement;

use crate::player::sampler::SharedSampler;
use crate::player::viz::{FeedHandle, VisualizerFeed};
use crate::player::{
    EventBus, PlaybackController, PlaybackPhase, PlaybackState, SilentSampler, Track,
    SPECTRUM_BINS,
};
#[cfg(target_arch = "wasm32")]
use crate::player::{WebMedia, WebSampler};

#[cfg(target_arch = "wasm32")]
type ActiveBackend = Option<WebMedia>;
#[cfg(not(target_arch = "wasm32"))]
type ActiveBackend = crate::player::NullMedia;

/// Read-only state snapshot the views render from.
#[derive(Clone, Copy)]
pub struct PlayerSnapshot(pub Signal<PlaybackState>);

/// Latest visualizer frame, one magnitude byte per bin.
#[derive(Clone, Copy)]
pub struct VisualizerFrame(pub Signal<Vec<u8>>);

/// Command surface handed to views through context. Views only issue
/// commands and read snapshots; the controller is the sole state writer.
#[derive(Clone)]
pub struct PlayerHandle {
    inner: Rc<RefCell<PlaybackController<ActiveBackend>>>,
    bus: EventBus,
    #[cfg(target_arch = "wasm32")]
    audio: Option<HtmlAudioElement>,
}

impl PlayerHandle {
    #[cfg(target_arch = "wasm32")]
    pub fn new(playlist: Vec<Track>) -> Self {
        let bus = EventBus::new();
        let media = WebMedia::create(bus.clone());
        if media.is_none() {
            warn!("audio element could not be created; playback disabled");
        }
        let audio = media.as_ref().map(|m| m.audio().clone());
        Self {
            inner: Rc::new(RefCell::new(PlaybackController::new(media, playlist))),
            bus,
            audio,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(playlist: Vec<Track>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PlaybackController::new(
                crate::player::NullMedia,
                playlist,
            ))),
            bus: EventBus::new(),
        }
    }

    pub fn playlist(&self) -> Vec<Track> {
        self.inner.borrow().playlist().to_vec()
    }

    // Commands, one forwarding method per controller command the views use.

    pub fn play_track(&self, index: usize) {
        self.inner.borrow_mut().play_track(index);
    }

    /// Plays a track by catalog id; what filtered lists go through, since
    /// their row order no longer matches playlist indices.
    pub fn play_track_id(&self, id: u32) {
        let index = self.inner.borrow().playlist().iter().position(|t| t.id == id);
        if let Some(index) = index {
            self.inner.borrow_mut().play_track(index);
        }
    }

    pub fn toggle_play(&self) {
        self.inner.borrow_mut().toggle_play();
    }

    pub fn pause(&self) {
        self.inner.borrow_mut().pause();
    }

    pub fn next(&self) {
        self.inner.borrow_mut().next();
    }

    pub fn previous(&self) {
        self.inner.borrow_mut().previous();
    }

    pub fn seek(&self, seconds: f64) {
        self.inner.borrow_mut().seek(seconds);
    }

    pub fn set_volume(&self, level: f64) {
        self.inner.borrow_mut().set_volume(level);
    }

    pub fn toggle_mute(&self) {
        self.inner.borrow_mut().toggle_mute();
    }

    pub fn toggle_shuffle(&self) {
        self.inner.borrow_mut().toggle_shuffle();
    }

    pub fn cycle_repeat(&self) {
        self.inner.borrow_mut().cycle_repeat();
    }

    pub fn set_playback_rate(&self, rate: f64) {
        self.inner.borrow_mut().set_playback_rate(rate);
    }

    pub fn clear_error(&self) {
        self.inner.borrow_mut().clear_error();
    }
}

pub fn use_player() -> PlayerHandle {
    use_context::<PlayerHandle>()
}

pub fn use_player_state() -> Signal<PlaybackState> {
    use_context::<PlayerSnapshot>().0
}

pub fn use_visualizer_frames() -> Signal<Vec<u8>> {
    use_context::<VisualizerFrame>().0
}

#[component]
pub fn PlayerBridge() -> Element {
    let handle = use_player();
    let snapshot = use_player_state();
    let mut frames = use_visualizer_frames();

    let feed_slot: Rc<RefCell<Option<FeedHandle>>> = use_hook(|| Rc::new(RefCell::new(None)));
    let sampler_slot: Rc<RefCell<Option<SharedSampler>>> = use_hook(|| Rc::new(RefCell::new(None)));

    // One-time wiring: controller state changes mirror into the snapshot
    // signal, media element events feed the controller.
    let subscription = use_hook(|| {
        let mut snapshot = snapshot;
        let id = handle
            .inner
            .borrow_mut()
            .subscribe(move |state| snapshot.set(state.clone()));

        #[cfg(target_arch = "wasm32")]
        {
            let runtime = Runtime::current();
            let controller = handle.inner.clone();
            handle.bus.connect(move |event| {
                // Media events arrive from DOM callbacks and resolved play
                // promises, outside any component scope.
                let _guard = RuntimeGuard::new(runtime.clone());
                controller.borrow_mut().handle_event(event);
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let controller = handle.inner.clone();
            handle
                .bus
                .connect(move |event| controller.borrow_mut().handle_event(event));
        }

        id
    });

    // Sampling loop lifecycle: strictly phase-driven. Entering Playing
    // (re)starts the feed, leaving Playing cancels the pending tick.
    let phase = use_memo(move || snapshot.read().phase);
    {
        let handle = handle.clone();
        let feed_slot = feed_slot.clone();
        let sampler_slot = sampler_slot.clone();
        use_effect(move || {
            if let Some(previous) = feed_slot.borrow_mut().take() {
                previous.cancel();
            }
            if phase() == PlaybackPhase::Playing {
                let sampler = acquire_sampler(&handle, &sampler_slot);
                let feed = VisualizerFeed::new(Box::new(sampler));
                *feed_slot.borrow_mut() = Some(feed.handle());
                #[cfg(target_arch = "wasm32")]
                crate::player::viz::drive(feed, frames);
                #[cfg(not(target_arch = "wasm32"))]
                drop(feed);
            } else {
                frames.set(vec![0; SPECTRUM_BINS]);
            }
        });
    }

    {
        let handle = handle.clone();
        let feed_slot = feed_slot.clone();
        use_drop(move || {
            if let Some(feed) = feed_slot.borrow_mut().take() {
                feed.cancel();
            }
            handle.bus.disconnect();
            handle.inner.borrow_mut().unsubscribe(subscription);
            handle.pause();
        });
    }

    rsx! {}
}

/// The sampler is built once per player instance and shared across loop
/// restarts; a media element only ever supports one source node.
#[cfg(target_arch = "wasm32")]
fn acquire_sampler(
    handle: &PlayerHandle,
    slot: &Rc<RefCell<Option<SharedSampler>>>,
) -> SharedSampler {
    if let Some(sampler) = slot.borrow().as_ref() {
        return sampler.clone();
    }
    let sampler = match handle.audio.as_ref().map(WebSampler::create) {
        Some(Ok(sampler)) => SharedSampler::new(Box::new(sampler)),
        _ => {
            warn!("frequency analysis unavailable; visualizer degraded to idle frames");
            handle.inner.borrow_mut().report_sampler_unavailable();
            SharedSampler::new(Box::new(SilentSampler::default()))
        }
    };
    *slot.borrow_mut() = Some(sampler.clone());
    sampler
}

#[cfg(not(target_arch = "wasm32"))]
fn acquire_sampler(
    _handle: &PlayerHandle,
    slot: &Rc<RefCell<Option<SharedSampler>>>,
) -> SharedSampler {
    if let Some(sampler) = slot.borrow().as_ref() {
        return sampler.clone();
    }
    let sampler = SharedSampler::new(Box::new(SilentSampler::default()));
    *slot.borrow_mut() = Some(sampler.clone());
    sampler
}
