//! The frequency analysis capability behind the visualizer. One sampler is
//! acquired explicitly per player instance (a browser only allows a single
//! media-element source node per element, so there is no lazy re-creation);
//! when acquisition fails the player degrades to a silent sampler and
//! transport is unaffected.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use web_sys::{AnalyserNode, AudioContext, AudioContextState, HtmlAudioElement};

/// Analyser resolution; a snapshot holds `FFT_RESOLUTION / 2` magnitude
/// bins, one byte each.
pub const FFT_RESOLUTION: u32 = 256;
pub const SPECTRUM_BINS: usize = (FFT_RESOLUTION / 2) as usize;

pub trait FrequencySampler {
    fn bin_count(&self) -> usize;
    /// One magnitude snapshot, `bin_count()` values in 0..=255.
    fn sample(&mut self) -> Vec<u8>;
}

/// Fallback sampler publishing all-zero frames at the normal cadence.
pub struct SilentSampler {
    bins: usize,
}

impl SilentSampler {
    pub fn new(bins: usize) -> Self {
        Self { bins }
    }
}

impl Default for SilentSampler {
    fn default() -> Self {
        Self::new(SPECTRUM_BINS)
    }
}

impl FrequencySampler for SilentSampler {
    fn bin_count(&self) -> usize {
        self.bins
    }

    fn sample(&mut self) -> Vec<u8> {
        vec![0; self.bins]
    }
}

/// Clone-shareable wrapper so one sampler can outlive any number of feed
/// restarts; the underlying analyser chain is built exactly once.
#[derive(Clone)]
pub struct SharedSampler {
    inner: std::rc::Rc<std::cell::RefCell<Box<dyn FrequencySampler>>>,
}

impl SharedSampler {
    pub fn new(sampler: Box<dyn FrequencySampler>) -> Self {
        Self {
            inner: std::rc::Rc::new(std::cell::RefCell::new(sampler)),
        }
    }
}

impl FrequencySampler for SharedSampler {
    fn bin_count(&self) -> usize {
        self.inner.borrow().bin_count()
    }

    fn sample(&mut self) -> Vec<u8> {
        self.inner.borrow_mut().sample()
    }
}

/// Web Audio analyser chain: element source -> analyser -> destination.
#[cfg(target_arch = "wasm32")]
pub struct WebSampler {
    context: AudioContext,
    analyser: AnalyserNode,
}

#[cfg(target_arch = "wasm32")]
impl WebSampler {
    pub fn create(audio: &HtmlAudioElement) -> Result<Self, JsValue> {
        let context = AudioContext::new()?;
        let analyser = context.create_analyser()?;
        analyser.set_fft_size(FFT_RESOLUTION);

        let source = context.create_media_element_source(audio)?;
        source.connect_with_audio_node(&analyser)?;
        analyser.connect_with_audio_node(&context.destination())?;

        Ok(Self { context, analyser })
    }
}

#[cfg(target_arch = "wasm32")]
impl FrequencySampler for WebSampler {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn sample(&mut self) -> Vec<u8> {
        // Autoplay policy can leave the context suspended until the first
        // user gesture; resuming here is harmless once running.
        if self.context.state() == AudioContextState::Suspended {
            let _ = self.context.resume();
        }
        let mut frame = vec![0u8; self.bin_count()];
        self.analyser.get_byte_frequency_data(&mut frame);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_sampler_yields_zeroed_frames() {
        let mut sampler = SilentSampler::default();
        let frame = sampler.sample();
        assert_eq!(frame.len(), SPECTRUM_BINS);
        assert!(frame.iter().all(|&v| v == 0));
    }
}
