//! Playback core: the state machine, its media element bridge, and the
//! visualizer sampling loop. Everything under this module is view-free and
//! (apart from the thin wasm adapters) runs under plain `cargo test`.

pub mod controller;
pub mod media;
pub mod sampler;
pub mod state;
pub mod viz;

pub use controller::{PlaybackController, SubscriberId};
pub use media::{EventBus, MediaBackend, MediaEvent, NullMedia};
#[cfg(target_arch = "wasm32")]
pub use media::WebMedia;
pub use sampler::{FrequencySampler, SharedSampler, SilentSampler, SPECTRUM_BINS};
#[cfg(target_arch = "wasm32")]
pub use sampler::WebSampler;
pub use state::{
    format_time, PlaybackError, PlaybackPhase, PlaybackState, RepeatMode, Track,
};
pub use viz::{FeedHandle, VisualizerFeed, FRAME_INTERVAL_MS};
