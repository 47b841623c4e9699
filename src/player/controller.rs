//! The playback controller: a state machine over [`PlaybackState`] driven
//! by UI commands on one side and [`MediaEvent`]s on the other. Commands
//! return immediately; `Playing` is only ever entered on the media
//! element's confirmation (its `play` event or a resolved play request),
//! never optimistically, so the state can't claim playback the element
//! has refused.

use rand::Rng;

use crate::player::media::{MediaBackend, MediaEvent};
use crate::player::state::{PlaybackError, PlaybackPhase, PlaybackState, Track};

/// Handle returned by [`PlaybackController::subscribe`]; pass it back to
/// `unsubscribe` when the observing view unmounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

pub struct PlaybackController<B: MediaBackend> {
    state: PlaybackState,
    playlist: Vec<Track>,
    backend: B,
    /// Bumped on every `select_track`; a `PlayOutcome` carrying an older
    /// epoch belongs to a superseded track and is discarded.
    play_epoch: u64,
    /// Set by an explicit `pause` and cleared by the next `play` or
    /// `select_track`. A `PlayOutcome` resolving under this flag belongs to
    /// a request the user has since overridden and is discarded; `Paused`
    /// reached any other way (a `canplay` resolving `Loading`) must not
    /// swallow outcomes.
    pause_requested: bool,
    subscribers: Vec<(u64, Box<dyn FnMut(&PlaybackState)>)>,
    next_subscriber: u64,
}

impl<B: MediaBackend> PlaybackController<B> {
    pub fn new(backend: B, playlist: Vec<Track>) -> Self {
        Self {
            state: PlaybackState::default(),
            playlist,
            backend,
            play_epoch: 0,
            pause_requested: false,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    #[cfg(test)]
    fn backend(&self) -> &B {
        &self.backend
    }

    // ---- commands -------------------------------------------------------

    /// Makes the track at `index` current and starts loading it. Volume,
    /// mute and rate carry over to the freshly loaded element.
    pub fn select_track(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index).cloned() else {
            return;
        };
        self.play_epoch += 1;
        self.pause_requested = false;
        let src = track.src.clone();
        self.state.set_track(track, index);
        self.backend.load(&src);
        self.backend.set_volume(self.state.effective_volume());
        self.backend.set_rate(self.state.playback_rate);
        self.notify();
    }

    /// Select and immediately request playback; what list rows and the
    /// transport's skip buttons go through.
    pub fn play_track(&mut self, index: usize) {
        self.select_track(index);
        self.play();
    }

    /// Requests playback of the current track. The `Playing` transition
    /// happens when the request resolves, not here.
    pub fn play(&mut self) {
        if self.state.current_track.is_none() {
            return;
        }
        self.pause_requested = false;
        self.backend.begin_play(self.play_epoch);
    }

    pub fn pause(&mut self) {
        self.pause_requested = true;
        if matches!(
            self.state.phase,
            PlaybackPhase::Playing | PlaybackPhase::Loading
        ) {
            self.backend.pause();
            self.state.phase = PlaybackPhase::Paused;
            self.notify();
        }
    }

    pub fn toggle_play(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else if self.state.current_track.is_some() {
            self.play();
        } else if !self.playlist.is_empty() {
            self.play_track(0);
        }
    }

    /// Optimistic seek: state moves now, the element confirms through a
    /// later `TimeUpdate`. No-op until the duration is known.
    pub fn seek(&mut self, seconds: f64) {
        if self.state.duration <= 0.0 {
            return;
        }
        self.state.set_time(seconds);
        self.backend.set_position(self.state.current_time);
        self.notify();
    }

    /// Stores the clamped volume. The audible level only changes while
    /// un-muted; a muted player keeps outputting silence.
    pub fn set_volume(&mut self, level: f64) {
        self.state.set_volume(level);
        if !self.state.muted {
            self.backend.set_volume(self.state.volume);
        }
        self.notify();
    }

    pub fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        self.backend.set_volume(self.state.effective_volume());
        self.notify();
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        self.state.set_rate(rate);
        self.backend.set_rate(self.state.playback_rate);
        self.notify();
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffled = !self.state.shuffled;
        self.notify();
    }

    pub fn cycle_repeat(&mut self) {
        self.state.repeat = self.state.repeat.cycled();
        self.notify();
    }

    pub fn next(&mut self) {
        if let Some(index) = self.next_index() {
            self.play_track(index);
        }
    }

    pub fn previous(&mut self) {
        if let Some(index) = self.previous_index() {
            self.play_track(index);
        }
    }

    /// Surfaces a failed frequency-sampler acquisition. Transport is
    /// untouched; only the visualizer is degraded.
    pub fn report_sampler_unavailable(&mut self) {
        self.state.last_error = Some(PlaybackError::SamplerUnavailable);
        self.notify();
    }

    pub fn clear_error(&mut self) {
        self.state.last_error = None;
        if self.state.phase == PlaybackPhase::Errored {
            self.state.phase = if self.state.current_track.is_some() {
                PlaybackPhase::Paused
            } else {
                PlaybackPhase::Idle
            };
        }
        self.notify();
    }

    /// Replaces the playlist. If the current track no longer sits at its
    /// index, playback stops rather than silently pointing at a stranger.
    pub fn set_playlist(&mut self, tracks: Vec<Track>) {
        self.playlist = tracks;
        let still_current = match (&self.state.current_track, self.state.current_index) {
            (Some(track), Some(index)) => {
                self.playlist.get(index).map(|t| t.id) == Some(track.id)
            }
            _ => true,
        };
        if !still_current {
            self.backend.pause();
            self.state.clear_track();
        }
        self.notify();
    }

    pub fn remove_track(&mut self, index: usize) {
        if index >= self.playlist.len() {
            return;
        }
        self.playlist.remove(index);
        match self.state.current_index {
            Some(current) if index == current => {
                self.backend.pause();
                self.state.clear_track();
            }
            Some(current) if index < current => {
                self.state.current_index = Some(current - 1);
            }
            _ => {}
        }
        self.notify();
    }

    // ---- event bridge ---------------------------------------------------

    /// Applies one media element event. Events are applied strictly in
    /// arrival order; `TimeUpdate` is superseding, everything else is not.
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadStart => {
                if self.state.current_track.is_some() {
                    self.state.phase = PlaybackPhase::Loading;
                }
            }
            MediaEvent::CanPlay => {
                if self.state.phase == PlaybackPhase::Loading {
                    self.state.phase = PlaybackPhase::Paused;
                }
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.state.set_duration(duration);
            }
            MediaEvent::TimeUpdate { seconds } => {
                self.state.set_time(seconds);
            }
            MediaEvent::Started => {
                if self.state.current_track.is_some() {
                    self.state.phase = PlaybackPhase::Playing;
                }
            }
            MediaEvent::Stopped => {
                if self.state.phase == PlaybackPhase::Playing {
                    self.state.phase = PlaybackPhase::Paused;
                }
            }
            MediaEvent::Failed => {
                if self.state.current_track.is_some() {
                    self.state.phase = PlaybackPhase::Errored;
                    self.state.last_error = Some(PlaybackError::MediaLoadFailed);
                }
            }
            MediaEvent::Ended => self.finish_track(),
            MediaEvent::PlayOutcome { epoch, ok } => {
                if epoch != self.play_epoch {
                    // Resolution of a request issued for a superseded
                    // track; the new track's state stands.
                    return;
                }
                if self.pause_requested {
                    // An explicit pause landed while the request was in
                    // flight; it wins either way. `Paused` reached through
                    // `canplay` does not count: a rejection arriving then
                    // must still surface as an error.
                    return;
                }
                if ok {
                    self.state.phase = PlaybackPhase::Playing;
                } else {
                    self.state.phase = PlaybackPhase::Errored;
                    self.state.last_error = Some(PlaybackError::PlaybackFailed);
                }
            }
        }
        self.notify();
    }

    /// Natural end of stream. `Ended` is transient: it resolves here in the
    /// same tick, settling into `Paused` only when the playlist has nowhere
    /// to go.
    fn finish_track(&mut self) {
        self.state.phase = PlaybackPhase::Ended;
        match self.state.repeat {
            crate::player::state::RepeatMode::One => {
                self.state.set_time(0.0);
                self.backend.set_position(0.0);
                // Same confirmation rule as everywhere else: the replay
                // request is issued here, Playing waits for its outcome.
                self.state.phase = PlaybackPhase::Loading;
                self.pause_requested = false;
                self.backend.begin_play(self.play_epoch);
            }
            crate::player::state::RepeatMode::All => self.next(),
            crate::player::state::RepeatMode::Off => {
                let len = self.playlist.len();
                let at_last = self
                    .state
                    .current_index
                    .map(|i| i + 1 >= len)
                    .unwrap_or(true);
                if at_last {
                    self.state.phase = PlaybackPhase::Paused;
                    self.state.current_time = self.state.duration;
                } else {
                    self.next();
                }
            }
        }
    }

    // ---- ordering policy ------------------------------------------------

    /// Shuffle draws uniformly over the whole playlist and may land on the
    /// track that just played; sequential order wraps unconditionally.
    fn next_index(&self) -> Option<usize> {
        let len = self.playlist.len();
        if len == 0 {
            return None;
        }
        Some(if self.state.shuffled {
            rand::thread_rng().gen_range(0..len)
        } else {
            match self.state.current_index {
                Some(current) => (current + 1) % len,
                None => 0,
            }
        })
    }

    fn previous_index(&self) -> Option<usize> {
        let len = self.playlist.len();
        if len == 0 {
            return None;
        }
        Some(if self.state.shuffled {
            rand::thread_rng().gen_range(0..len)
        } else {
            match self.state.current_index {
                Some(current) => (current + len - 1) % len,
                None => 0,
            }
        })
    }

    // ---- change notification --------------------------------------------

    pub fn subscribe<F: FnMut(&PlaybackState) + 'static>(&mut self, callback: F) -> SubscriberId {
        let id = self.next_subscriber;
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        SubscriberId(id)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sub, _)| *sub != id.0);
    }

    fn notify(&mut self) {
        // Listeners only observe the snapshot; they cannot reenter the
        // controller, so taking the list out for the duration is enough.
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for (_, callback) in subscribers.iter_mut() {
            callback(&self.state);
        }
        subscribers.extend(self.subscribers.drain(..));
        self.subscribers = subscribers;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::state::RepeatMode;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct MockMedia {
        loads: Vec<String>,
        plays: Vec<u64>,
        pauses: usize,
        positions: Vec<f64>,
        volumes: Vec<f64>,
        rates: Vec<f64>,
    }

    impl MediaBackend for MockMedia {
        fn load(&mut self, src: &str) {
            self.loads.push(src.to_string());
        }
        fn begin_play(&mut self, epoch: u64) {
            self.plays.push(epoch);
        }
        fn pause(&mut self) {
            self.pauses += 1;
        }
        fn set_position(&mut self, seconds: f64) {
            self.positions.push(seconds);
        }
        fn set_volume(&mut self, level: f64) {
            self.volumes.push(level);
        }
        fn set_rate(&mut self, rate: f64) {
            self.rates.push(rate);
        }
    }

    fn track(id: u32, title: &str, duration: f64) -> Track {
        Track {
            id,
            title: title.into(),
            artist: "Artist".into(),
            album: None,
            genre: None,
            year: None,
            duration_seconds: duration,
            src: format!("/audio/{title}.mp3"),
            cover: None,
            color: "#000".into(),
        }
    }

    fn controller(n: u32) -> PlaybackController<MockMedia> {
        let playlist = (0..n)
            .map(|i| track(i + 1, &format!("track-{i}"), 180.0))
            .collect();
        PlaybackController::new(MockMedia::default(), playlist)
    }

    /// Resolves the most recent play request successfully.
    fn confirm_play(c: &mut PlaybackController<MockMedia>) {
        let epoch = *c.backend().plays.last().expect("no play request issued");
        c.handle_event(MediaEvent::PlayOutcome { epoch, ok: true });
    }

    #[test]
    fn sequential_next_wraps_modulo_length() {
        let mut c = controller(3);
        c.select_track(0);
        let mut seen = Vec::new();
        for _ in 0..6 {
            c.next();
            seen.push(c.state().current_index.unwrap());
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn sequential_previous_wraps_to_last() {
        let mut c = controller(3);
        c.select_track(0);
        c.previous();
        assert_eq!(c.state().current_index, Some(2));
        c.previous();
        assert_eq!(c.state().current_index, Some(1));
    }

    #[test]
    fn shuffled_next_always_lands_in_range() {
        let mut c = controller(5);
        c.select_track(0);
        c.toggle_shuffle();
        for _ in 0..50 {
            c.next();
            assert!(c.state().current_index.unwrap() < 5);
        }
    }

    #[test]
    fn next_on_empty_playlist_is_a_noop() {
        let mut c = controller(0);
        c.next();
        c.previous();
        assert_eq!(c.state().current_index, None);
        assert!(c.backend().loads.is_empty());
    }

    #[test]
    fn set_volume_stores_clamped_value_and_leaves_mute_alone() {
        let mut c = controller(1);
        c.set_volume(2.5);
        assert_eq!(c.state().volume, 1.0);
        c.set_volume(-1.0);
        assert_eq!(c.state().volume, 0.0);
        assert!(!c.state().muted);
    }

    #[test]
    fn set_volume_while_muted_is_not_pushed_to_the_element() {
        let mut c = controller(1);
        c.toggle_mute();
        let pushes = c.backend().volumes.len();
        c.set_volume(0.5);
        assert_eq!(c.backend().volumes.len(), pushes);
        assert_eq!(c.state().volume, 0.5);
    }

    #[test]
    fn toggle_mute_twice_restores_effective_volume() {
        let mut c = controller(1);
        c.set_volume(0.7);
        c.toggle_mute();
        assert_eq!(c.backend().volumes.last(), Some(&0.0));
        assert_eq!(c.state().effective_volume(), 0.0);
        c.toggle_mute();
        assert_eq!(c.backend().volumes.last(), Some(&0.7));
        assert_eq!(c.state().effective_volume(), 0.7);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut c = controller(1);
        c.select_track(0);
        c.handle_event(MediaEvent::LoadedMetadata { duration: 180.0 });
        c.seek(500.0);
        assert_eq!(c.state().current_time, 180.0);
        c.seek(-3.0);
        assert_eq!(c.state().current_time, 0.0);
        assert_eq!(c.backend().positions, vec![180.0, 0.0]);
    }

    #[test]
    fn seek_before_metadata_is_a_noop() {
        let mut c = controller(1);
        c.select_track(0);
        c.seek(30.0);
        assert_eq!(c.state().current_time, 0.0);
        assert!(c.backend().positions.is_empty());
    }

    #[test]
    fn play_confirmation_enters_playing() {
        let mut c = controller(2);
        c.play_track(0);
        assert_eq!(c.state().phase, PlaybackPhase::Loading);
        confirm_play(&mut c);
        assert_eq!(c.state().phase, PlaybackPhase::Playing);
    }

    #[test]
    fn rejected_play_sets_errored_without_touching_time() {
        let mut c = controller(1);
        c.play_track(0);
        c.handle_event(MediaEvent::LoadedMetadata { duration: 180.0 });
        c.handle_event(MediaEvent::TimeUpdate { seconds: 12.0 });
        let epoch = *c.backend().plays.last().unwrap();
        c.handle_event(MediaEvent::PlayOutcome { epoch, ok: false });
        assert_eq!(c.state().phase, PlaybackPhase::Errored);
        assert_eq!(c.state().last_error, Some(PlaybackError::PlaybackFailed));
        assert_eq!(c.state().current_time, 12.0);
        assert_eq!(c.state().duration, 180.0);
    }

    #[test]
    fn stale_play_outcome_for_superseded_track_is_discarded() {
        let mut c = controller(2);
        c.play_track(0);
        let stale_epoch = *c.backend().plays.last().unwrap();
        c.select_track(1);
        assert_eq!(c.state().phase, PlaybackPhase::Loading);

        // The abandoned request resolves late, both ways; neither may
        // disturb the new track's state.
        c.handle_event(MediaEvent::PlayOutcome {
            epoch: stale_epoch,
            ok: true,
        });
        assert_eq!(c.state().phase, PlaybackPhase::Loading);
        c.handle_event(MediaEvent::PlayOutcome {
            epoch: stale_epoch,
            ok: false,
        });
        assert_eq!(c.state().phase, PlaybackPhase::Loading);
        assert!(c.state().last_error.is_none());
    }

    #[test]
    fn pause_wins_over_an_in_flight_play_request() {
        let mut c = controller(1);
        c.play_track(0);
        let epoch = *c.backend().plays.last().unwrap();
        c.pause();
        assert_eq!(c.state().phase, PlaybackPhase::Paused);
        c.handle_event(MediaEvent::PlayOutcome { epoch, ok: false });
        assert_eq!(c.state().phase, PlaybackPhase::Paused);
        assert!(c.state().last_error.is_none());
    }

    #[test]
    fn rejected_play_from_canplay_paused_surfaces_error() {
        // The autoplay-blocked flow: the track settles into Paused via
        // canplay, the user hits play, the element rejects the request.
        let mut c = controller(1);
        c.select_track(0);
        c.handle_event(MediaEvent::CanPlay);
        assert_eq!(c.state().phase, PlaybackPhase::Paused);

        c.play();
        let epoch = *c.backend().plays.last().unwrap();
        c.handle_event(MediaEvent::PlayOutcome { epoch, ok: false });
        assert_eq!(c.state().phase, PlaybackPhase::Errored);
        assert_eq!(c.state().last_error, Some(PlaybackError::PlaybackFailed));
    }

    #[test]
    fn confirmed_play_from_canplay_paused_enters_playing() {
        let mut c = controller(1);
        c.select_track(0);
        c.handle_event(MediaEvent::CanPlay);

        c.play();
        confirm_play(&mut c);
        assert_eq!(c.state().phase, PlaybackPhase::Playing);
    }

    #[test]
    fn play_after_pause_lets_the_new_outcome_through() {
        // A pause discards the in-flight outcome, but only until the next
        // play request; that one's resolution must land normally.
        let mut c = controller(1);
        c.play_track(0);
        c.pause();
        c.play();
        confirm_play(&mut c);
        assert_eq!(c.state().phase, PlaybackPhase::Playing);
    }

    #[test]
    fn canplay_resolves_loading_to_paused() {
        let mut c = controller(1);
        c.select_track(0);
        c.handle_event(MediaEvent::CanPlay);
        assert_eq!(c.state().phase, PlaybackPhase::Paused);
    }

    #[test]
    fn ended_advances_to_the_next_track() {
        // Playlist [A(180s), B(200s)], repeat off, playing A near the end.
        let mut c = controller(2);
        c.play_track(0);
        c.handle_event(MediaEvent::LoadedMetadata { duration: 180.0 });
        confirm_play(&mut c);
        c.handle_event(MediaEvent::TimeUpdate { seconds: 179.0 });

        c.handle_event(MediaEvent::Ended);
        assert_eq!(c.state().current_index, Some(1));
        assert_eq!(c.state().phase, PlaybackPhase::Loading);
        assert_eq!(c.backend().loads.last().unwrap(), "/audio/track-1.mp3");

        confirm_play(&mut c);
        assert_eq!(c.state().phase, PlaybackPhase::Playing);
    }

    #[test]
    fn ended_on_last_track_without_repeat_settles_paused_at_duration() {
        let mut c = controller(2);
        c.play_track(1);
        c.handle_event(MediaEvent::LoadedMetadata { duration: 200.0 });
        confirm_play(&mut c);

        let loads_before = c.backend().loads.len();
        c.handle_event(MediaEvent::Ended);
        assert_eq!(c.state().phase, PlaybackPhase::Paused);
        assert_eq!(c.state().current_time, 200.0);
        assert_eq!(c.state().current_index, Some(1));
        assert_eq!(c.backend().loads.len(), loads_before);
    }

    #[test]
    fn ended_with_repeat_one_replays_the_same_track() {
        let mut c = controller(2);
        c.play_track(0);
        c.handle_event(MediaEvent::LoadedMetadata { duration: 180.0 });
        confirm_play(&mut c);
        c.cycle_repeat();
        c.cycle_repeat();
        assert_eq!(c.state().repeat, RepeatMode::One);

        let plays_before = c.backend().plays.len();
        c.handle_event(MediaEvent::Ended);
        assert_eq!(c.state().current_time, 0.0);
        assert_eq!(c.state().current_index, Some(0));
        assert_eq!(c.backend().positions.last(), Some(&0.0));

        // The replay is a fresh request; Playing waits for its outcome.
        assert_eq!(c.state().phase, PlaybackPhase::Loading);
        assert_eq!(c.backend().plays.len(), plays_before + 1);
        confirm_play(&mut c);
        assert_eq!(c.state().phase, PlaybackPhase::Playing);
    }

    #[test]
    fn ended_with_repeat_all_wraps_past_the_last_track() {
        let mut c = controller(2);
        c.play_track(1);
        c.handle_event(MediaEvent::LoadedMetadata { duration: 200.0 });
        confirm_play(&mut c);
        c.cycle_repeat();
        assert_eq!(c.state().repeat, RepeatMode::All);

        c.handle_event(MediaEvent::Ended);
        assert_eq!(c.state().current_index, Some(0));
        assert_eq!(c.state().phase, PlaybackPhase::Loading);
    }

    #[test]
    fn media_failure_sets_errored_and_select_clears_it() {
        let mut c = controller(2);
        c.select_track(0);
        c.handle_event(MediaEvent::Failed);
        assert_eq!(c.state().phase, PlaybackPhase::Errored);
        assert_eq!(c.state().last_error, Some(PlaybackError::MediaLoadFailed));

        c.select_track(1);
        assert!(c.state().last_error.is_none());
        assert_eq!(c.state().phase, PlaybackPhase::Loading);
    }

    #[test]
    fn clear_error_returns_to_a_commandable_phase() {
        let mut c = controller(1);
        c.select_track(0);
        c.handle_event(MediaEvent::Failed);
        c.clear_error();
        assert!(c.state().last_error.is_none());
        assert_eq!(c.state().phase, PlaybackPhase::Paused);
    }

    #[test]
    fn select_track_applies_volume_and_rate_to_the_element() {
        let mut c = controller(1);
        c.set_volume(0.4);
        c.set_playback_rate(1.5);
        c.select_track(0);
        assert_eq!(c.backend().volumes.last(), Some(&0.4));
        assert_eq!(c.backend().rates.last(), Some(&1.5));
    }

    #[test]
    fn removing_the_current_track_stops_playback() {
        let mut c = controller(3);
        c.play_track(1);
        c.remove_track(1);
        assert_eq!(c.state().current_track, None);
        assert_eq!(c.state().phase, PlaybackPhase::Idle);
        assert!(c.backend().pauses > 0);
    }

    #[test]
    fn removing_an_earlier_track_shifts_the_current_index() {
        let mut c = controller(3);
        c.play_track(2);
        c.remove_track(0);
        assert_eq!(c.state().current_index, Some(1));
        assert_eq!(c.state().current_track.as_ref().unwrap().id, 3);
    }

    #[test]
    fn subscribers_observe_changes_until_unsubscribed() {
        let mut c = controller(2);
        let seen: Rc<RefCell<Vec<PlaybackPhase>>> = Rc::default();
        let sink = seen.clone();
        let id = c.subscribe(move |state| sink.borrow_mut().push(state.phase));

        c.select_track(0);
        assert_eq!(seen.borrow().last(), Some(&PlaybackPhase::Loading));

        c.unsubscribe(id);
        let count = seen.borrow().len();
        c.pause();
        assert_eq!(seen.borrow().len(), count);
    }
}
