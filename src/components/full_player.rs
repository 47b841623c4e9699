use dioxus::prelude::*;

use crate::components::{use_player, use_player_state, Icon, ProgressBar, Visualizer};
use crate::player::{PlaybackPhase, RepeatMode};

const RATE_STEPS: [f64; 4] = [1.0, 1.25, 1.5, 0.75];

/// The full-page player: artwork, visualizer, transport, volume and
/// playback-rate controls.
#[component]
pub fn FullPlayer() -> Element {
    let handle = use_player();
    let state = use_player_state();

    let snapshot = state.read().clone();
    let Some(track) = snapshot.current_track.clone() else {
        return rsx! {
            div { class: "player-empty",
                Icon { name: "music".to_string(), class: "player-empty-icon".to_string() }
                p { "Nothing is playing. Pick a track from the library." }
            }
        };
    };

    let is_playing = snapshot.phase == PlaybackPhase::Playing;
    let repeat_icon = match snapshot.repeat {
        RepeatMode::One => "repeat-one",
        _ => "repeat",
    };
    let volume_percent = (snapshot.volume * 100.0).round();

    let error_message = snapshot.last_error.map(|e| e.to_string());

    let shuffle_handle = handle.clone();
    let prev_handle = handle.clone();
    let play_handle = handle.clone();
    let next_handle = handle.clone();
    let repeat_handle = handle.clone();
    let mute_handle = handle.clone();
    let volume_handle = handle.clone();
    let rate_handle = handle.clone();
    let clear_handle = handle.clone();

    let current_rate = snapshot.playback_rate;
    let next_rate = {
        let position = RATE_STEPS
            .iter()
            .position(|r| (r - current_rate).abs() < f64::EPSILON)
            .unwrap_or(0);
        RATE_STEPS[(position + 1) % RATE_STEPS.len()]
    };

    rsx! {
        div { class: "full-player",
            if let Some(message) = error_message {
                div { class: "error-banner", role: "alert",
                    Icon { name: "alert".to_string(), class: "error-icon".to_string() }
                    span { "{message}" }
                    button {
                        class: "error-dismiss",
                        aria_label: "Dismiss error",
                        onclick: move |_| clear_handle.clear_error(),
                        Icon { name: "close".to_string(), class: "error-icon".to_string() }
                    }
                }
            }

            div { class: "player-artwork", style: "background: {track.color};",
                Icon { name: "music".to_string(), class: "artwork-icon".to_string() }
            }

            div { class: "player-meta",
                h2 { class: "player-title", "{track.title}" }
                p { class: "player-artist", "{track.artist}" }
                if let Some(album) = track.album.as_ref() {
                    p { class: "player-album", "{album}" }
                }
            }

            Visualizer {}
            ProgressBar { compact: false }

            div { class: "player-controls",
                button {
                    class: "control-button",
                    class: if snapshot.shuffled { "active" },
                    aria_label: "Toggle shuffle",
                    onclick: move |_| shuffle_handle.toggle_shuffle(),
                    Icon { name: "shuffle".to_string(), class: "control-icon".to_string() }
                }
                button {
                    id: "prev-btn",
                    class: "control-button",
                    aria_label: "Previous track",
                    onclick: move |_| prev_handle.previous(),
                    Icon { name: "previous".to_string(), class: "control-icon".to_string() }
                }
                button {
                    class: "control-button primary large",
                    aria_label: if is_playing { "Pause" } else { "Play" },
                    onclick: move |_| play_handle.toggle_play(),
                    Icon {
                        name: if is_playing { "pause".to_string() } else { "play".to_string() },
                        class: "control-icon".to_string(),
                    }
                }
                button {
                    id: "next-btn",
                    class: "control-button",
                    aria_label: "Next track",
                    onclick: move |_| next_handle.next(),
                    Icon { name: "next".to_string(), class: "control-icon".to_string() }
                }
                button {
                    class: "control-button",
                    class: if snapshot.repeat != RepeatMode::Off { "active" },
                    aria_label: "Cycle repeat mode",
                    onclick: move |_| repeat_handle.cycle_repeat(),
                    Icon { name: repeat_icon.to_string(), class: "control-icon".to_string() }
                }
            }

            div { class: "player-secondary",
                div { class: "volume-control",
                    button {
                        class: "control-button",
                        aria_label: if snapshot.muted { "Unmute" } else { "Mute" },
                        onclick: move |_| mute_handle.toggle_mute(),
                        Icon {
                            name: if snapshot.muted { "volume-mute".to_string() } else { "volume".to_string() },
                            class: "control-icon".to_string(),
                        }
                    }
                    input {
                        class: "volume-slider",
                        r#type: "range",
                        min: "0",
                        max: "100",
                        value: "{volume_percent}",
                        aria_label: "Volume",
                        oninput: move |event: Event<FormData>| {
                            if let Ok(value) = event.value().parse::<f64>() {
                                volume_handle.set_volume(value / 100.0);
                            }
                        },
                    }
                }
                button {
                    class: "rate-button",
                    aria_label: "Playback speed",
                    onclick: move |_| rate_handle.set_playback_rate(next_rate),
                    "{current_rate}x"
                }
            }
        }
    }
}
