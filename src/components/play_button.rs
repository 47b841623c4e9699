use dioxus::prelude::*;

use crate::components::{use_player, use_player_state, Icon};

/// Play/pause toggle for one track. Clicking a non-current track selects
/// and plays it; clicking the current one toggles transport.
#[component]
pub fn PlayButton(track_id: u32, class: String) -> Element {
    let handle = use_player();
    let state = use_player_state();

    let (is_current, is_playing, is_loading) = {
        let snapshot = state.read();
        (
            snapshot.current_track.as_ref().map(|t| t.id) == Some(track_id),
            snapshot.is_playing(),
            snapshot.is_loading(),
        )
    };

    let icon = if is_current && is_playing {
        "pause"
    } else {
        "play"
    };

    rsx! {
        button {
            class: "{class}",
            class: if is_current { "current" },
            disabled: is_current && is_loading,
            aria_label: if is_current && is_playing { "Pause" } else { "Play" },
            onclick: move |_| {
                if is_current {
                    handle.toggle_play();
                } else {
                    handle.play_track_id(track_id);
                }
            },
            Icon { name: icon.to_string(), class: "button-icon".to_string() }
        }
    }
}
