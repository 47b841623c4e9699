use dioxus::prelude::*;

use crate::components::{use_player, use_player_state, AppView, Icon, ProgressBar};

/// Docked transport bar shown on every page while a track is loaded.
#[component]
pub fn MiniPlayer() -> Element {
    let handle = use_player();
    let state = use_player_state();

    let snapshot = state.read();
    let Some(track) = snapshot.current_track.clone() else {
        return rsx! {};
    };
    let is_playing = snapshot.is_playing();
    drop(snapshot);

    let play_handle = handle.clone();
    let prev_handle = handle.clone();
    let next_handle = handle.clone();

    rsx! {
        div { class: "mini-player",
            Link { class: "mini-track", to: AppView::PlayerView {},
                div { class: "mini-swatch", style: "background: {track.color};",
                    Icon { name: "music".to_string(), class: "mini-swatch-icon".to_string() }
                }
                div { class: "mini-meta",
                    span { class: "mini-title", "{track.title}" }
                    span { class: "mini-artist", "{track.artist}" }
                }
            }
            div { class: "mini-controls",
                button {
                    class: "control-button",
                    aria_label: "Previous track",
                    onclick: move |_| prev_handle.previous(),
                    Icon { name: "previous".to_string(), class: "control-icon".to_string() }
                }
                button {
                    id: "play-pause-btn",
                    class: "control-button primary",
                    aria_label: if is_playing { "Pause" } else { "Play" },
                    onclick: move |_| play_handle.toggle_play(),
                    Icon {
                        name: if is_playing { "pause".to_string() } else { "play".to_string() },
                        class: "control-icon".to_string(),
                    }
                }
                button {
                    class: "control-button",
                    aria_label: "Next track",
                    onclick: move |_| next_handle.next(),
                    Icon { name: "next".to_string(), class: "control-icon".to_string() }
                }
            }
            ProgressBar { compact: true }
        }
    }
}
