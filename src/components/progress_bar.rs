use dioxus::prelude::*;

use crate::components::{use_player, use_player_state};
use crate::player::format_time;

/// Seek slider plus elapsed/total time labels. Dragging updates the state
/// optimistically through `seek`; the element's own time-update events
/// reconcile the position afterwards.
#[component]
pub fn ProgressBar(compact: bool) -> Element {
    let handle = use_player();
    let state = use_player_state();

    let (current_time, duration, fallback, seekable) = {
        let snapshot = state.read();
        let fallback = snapshot
            .current_track
            .as_ref()
            .map(|t| t.duration_seconds)
            .unwrap_or(0.0);
        (
            snapshot.current_time,
            snapshot.duration,
            fallback,
            snapshot.duration > 0.0,
        )
    };

    // Until metadata arrives the catalog duration is shown, but the slider
    // stays inert; there is nothing to seek inside yet.
    let shown_duration = if duration > 0.0 { duration } else { fallback };
    let percent = if duration > 0.0 {
        (current_time / duration) * 100.0
    } else {
        0.0
    };

    let on_seek = move |event: Event<FormData>| {
        if let Ok(value) = event.value().parse::<f64>() {
            if duration > 0.0 {
                handle.seek((value.clamp(0.0, 100.0) / 100.0) * duration);
            }
        }
    };

    rsx! {
        div { class: if compact { "progress compact" } else { "progress" },
            span { class: "time-label", "{format_time(current_time)}" }
            input {
                class: "progress-slider",
                r#type: "range",
                min: "0",
                max: "100",
                step: "0.1",
                value: "{percent}",
                disabled: !seekable,
                oninput: on_seek,
            }
            span { class: "time-label", "{format_time(shown_duration)}" }
        }
    }
}
