//! Playback state: the track model and the data half of the player's
//! state machine. Everything here is plain data plus invariant-preserving
//! mutators; the controller decides *when* fields change, this module
//! makes sure they can never hold an out-of-range value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A playable track in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: u32,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    /// Catalog duration in seconds; superseded by the media element's
    /// reported duration once metadata loads.
    pub duration_seconds: f64,
    pub src: String,
    #[serde(default)]
    pub cover: Option<String>,
    /// Accent color used by the views when no cover art is available.
    pub color: String,
}

/// Discrete playback lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Ended,
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("the audio source could not be fetched or decoded")]
    MediaLoadFailed,
    #[error("playback was rejected by the media element")]
    PlaybackFailed,
    #[error("frequency analysis is unavailable")]
    SamplerUnavailable,
}

pub const MIN_PLAYBACK_RATE: f64 = 0.25;
pub const MAX_PLAYBACK_RATE: f64 = 2.0;

/// The full state the views bind to. Owned and mutated exclusively by the
/// controller; views receive read-only snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub current_index: Option<usize>,
    pub phase: PlaybackPhase,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub shuffled: bool,
    pub repeat: RepeatMode,
    pub playback_rate: f64,
    pub last_error: Option<PlaybackError>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track: None,
            current_index: None,
            phase: PlaybackPhase::Idle,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted: false,
            shuffled: false,
            repeat: RepeatMode::Off,
            playback_rate: 1.0,
            last_error: None,
        }
    }
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn is_loading(&self) -> bool {
        self.phase == PlaybackPhase::Loading
    }

    /// The level actually pushed to the media element. Muting forces the
    /// output to zero without touching the stored volume, so un-muting
    /// restores the pre-mute level exactly.
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Position as a 0..=100 percentage for the progress slider.
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration) * 100.0
        } else {
            0.0
        }
    }

    pub(crate) fn set_volume(&mut self, level: f64) {
        self.volume = clamp_unit(level);
    }

    pub(crate) fn set_time(&mut self, seconds: f64) {
        self.current_time = if self.duration > 0.0 {
            seconds.clamp(0.0, self.duration)
        } else {
            seconds.max(0.0)
        };
    }

    pub(crate) fn set_duration(&mut self, seconds: f64) {
        self.duration = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        // Reported duration can shrink below an optimistic seek.
        self.set_time(self.current_time);
    }

    pub(crate) fn set_rate(&mut self, rate: f64) {
        self.playback_rate = if rate.is_finite() {
            rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE)
        } else {
            1.0
        };
    }

    /// Makes `track` the single current track, zeroing time and duration
    /// until the media element reloads metadata.
    pub(crate) fn set_track(&mut self, track: Track, index: usize) {
        self.current_track = Some(track);
        self.current_index = Some(index);
        self.current_time = 0.0;
        self.duration = 0.0;
        self.phase = PlaybackPhase::Loading;
        self.last_error = None;
    }

    pub(crate) fn clear_track(&mut self) {
        self.current_track = None;
        self.current_index = None;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.phase = PlaybackPhase::Idle;
    }
}

pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Formats seconds as `m:ss` for display.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str) -> Track {
        Track {
            id: 1,
            title: title.into(),
            artist: "Test Artist".into(),
            album: None,
            genre: None,
            year: None,
            duration_seconds: 180.0,
            src: format!("/audio/{title}.mp3"),
            cover: None,
            color: "#6366f1".into(),
        }
    }

    #[test]
    fn volume_is_clamped_to_unit_range() {
        let mut state = PlaybackState::default();
        state.set_volume(1.7);
        assert_eq!(state.volume, 1.0);
        state.set_volume(-0.3);
        assert_eq!(state.volume, 0.0);
        state.set_volume(f64::NAN);
        assert_eq!(state.volume, 0.0);
    }

    #[test]
    fn mute_preserves_stored_volume() {
        let mut state = PlaybackState::default();
        state.set_volume(0.6);
        state.muted = true;
        assert_eq!(state.effective_volume(), 0.0);
        assert_eq!(state.volume, 0.6);
        state.muted = false;
        assert_eq!(state.effective_volume(), 0.6);
    }

    #[test]
    fn time_clamps_against_known_duration() {
        let mut state = PlaybackState::default();
        state.set_duration(200.0);
        state.set_time(250.0);
        assert_eq!(state.current_time, 200.0);
        state.set_time(-5.0);
        assert_eq!(state.current_time, 0.0);
    }

    #[test]
    fn shrinking_duration_pulls_time_back() {
        let mut state = PlaybackState::default();
        state.set_duration(300.0);
        state.set_time(280.0);
        state.set_duration(200.0);
        assert_eq!(state.current_time, 200.0);
    }

    #[test]
    fn nan_duration_is_treated_as_unknown() {
        let mut state = PlaybackState::default();
        state.set_duration(f64::NAN);
        assert_eq!(state.duration, 0.0);
    }

    #[test]
    fn selecting_a_track_resets_time_and_duration() {
        let mut state = PlaybackState::default();
        state.set_duration(200.0);
        state.set_time(42.0);
        state.set_track(track("one"), 0);
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.duration, 0.0);
        assert_eq!(state.phase, PlaybackPhase::Loading);
        assert_eq!(state.current_index, Some(0));
    }

    #[test]
    fn track_and_index_are_set_together() {
        let mut state = PlaybackState::default();
        assert!(state.current_track.is_none() && state.current_index.is_none());
        state.set_track(track("one"), 3);
        assert!(state.current_track.is_some() && state.current_index.is_some());
        state.clear_track();
        assert!(state.current_track.is_none() && state.current_index.is_none());
    }

    #[test]
    fn repeat_mode_cycles_off_all_one() {
        let mut mode = RepeatMode::Off;
        mode = mode.cycled();
        assert_eq!(mode, RepeatMode::All);
        mode = mode.cycled();
        assert_eq!(mode, RepeatMode::One);
        mode = mode.cycled();
        assert_eq!(mode, RepeatMode::Off);
    }

    #[test]
    fn playback_rate_is_clamped() {
        let mut state = PlaybackState::default();
        state.set_rate(5.0);
        assert_eq!(state.playback_rate, MAX_PLAYBACK_RATE);
        state.set_rate(0.0);
        assert_eq!(state.playback_rate, MIN_PLAYBACK_RATE);
    }

    #[test]
    fn format_time_renders_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.4), "1:05");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
