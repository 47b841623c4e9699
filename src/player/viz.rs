//! The visualizer sampling loop, modeled as a cancellable scheduled task:
//! starting a feed hands out a [`FeedHandle`], the owner keeps at most one
//! live handle and cancels before replacing it on every transition out of
//! `Playing`. A cancelled feed never yields another frame, so no orphaned
//! tick can outlive a phase change or an unmount.

use std::cell::Cell;
use std::rc::Rc;

use crate::player::sampler::FrequencySampler;

/// Polling cadence for the simplified fixed-timer variant of the loop.
pub const FRAME_INTERVAL_MS: u32 = 100;

/// Cancellation token for a running feed. Clones share liveness.
#[derive(Clone)]
pub struct FeedHandle {
    live: Rc<Cell<bool>>,
}

impl FeedHandle {
    pub fn cancel(&self) {
        self.live.set(false);
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }
}

/// Loop body shared by the wasm driver and the tests: one `tick` pulls one
/// snapshot, or reports that the feed has been cancelled.
pub struct VisualizerFeed {
    sampler: Box<dyn FrequencySampler>,
    handle: FeedHandle,
}

impl VisualizerFeed {
    pub fn new(sampler: Box<dyn FrequencySampler>) -> Self {
        Self {
            sampler,
            handle: FeedHandle {
                live: Rc::new(Cell::new(true)),
            },
        }
    }

    pub fn handle(&self) -> FeedHandle {
        self.handle.clone()
    }

    /// `None` once cancelled; the driver must stop scheduling on `None`.
    pub fn tick(&mut self) -> Option<Vec<u8>> {
        if !self.handle.is_live() {
            return None;
        }
        Some(self.sampler.sample())
    }

    /// The frame shown while nothing is playing.
    pub fn idle_frame(&self) -> Vec<u8> {
        vec![0; self.sampler.bin_count()]
    }
}

/// Runs the feed on the host scheduler until it is cancelled, publishing
/// each frame into the signal the visualizer view renders from.
#[cfg(target_arch = "wasm32")]
pub fn drive(mut feed: VisualizerFeed, mut frames: dioxus::prelude::Signal<Vec<u8>>) {
    dioxus::prelude::spawn(async move {
        loop {
            gloo_timers::future::TimeoutFuture::new(FRAME_INTERVAL_MS).await;
            match feed.tick() {
                Some(frame) => frames.set(frame),
                None => break,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    /// Counts samples taken so tests can assert none happen after cancel.
    struct CountingSampler {
        samples: Rc<Cell<usize>>,
    }

    impl FrequencySampler for CountingSampler {
        fn bin_count(&self) -> usize {
            4
        }
        fn sample(&mut self) -> Vec<u8> {
            self.samples.set(self.samples.get() + 1);
            vec![9; 4]
        }
    }

    #[test]
    fn live_feed_yields_frames() {
        let samples = Rc::new(Cell::new(0));
        let mut feed = VisualizerFeed::new(Box::new(CountingSampler {
            samples: samples.clone(),
        }));
        assert_eq!(feed.tick(), Some(vec![9; 4]));
        assert_eq!(feed.tick(), Some(vec![9; 4]));
        assert_eq!(samples.get(), 2);
    }

    #[test]
    fn cancelled_feed_never_yields_again() {
        let samples = Rc::new(Cell::new(0));
        let mut feed = VisualizerFeed::new(Box::new(CountingSampler {
            samples: samples.clone(),
        }));
        feed.tick();
        feed.handle().cancel();

        // Ticks already scheduled when teardown happened must all come up
        // empty; the sampler is never touched again.
        for _ in 0..5 {
            assert_eq!(feed.tick(), None);
        }
        assert_eq!(samples.get(), 1);
    }

    #[test]
    fn handle_clones_share_cancellation() {
        let mut feed = VisualizerFeed::new(Box::new(crate::player::sampler::SilentSampler::new(8)));
        let a = feed.handle();
        let b = feed.handle();
        a.cancel();
        assert!(!b.is_live());
        assert_eq!(feed.tick(), None);
    }

    #[test]
    fn idle_frame_matches_bin_count() {
        let feed = VisualizerFeed::new(Box::new(crate::player::sampler::SilentSampler::new(16)));
        assert_eq!(feed.idle_frame(), vec![0; 16]);
    }
}
