use dioxus::prelude::*;

use crate::components::{use_player_state, PlayButton};
use crate::player::{format_time, Track};

#[component]
pub fn TrackList(tracks: Vec<Track>) -> Element {
    let state = use_player_state();
    let current_id = state.read().current_track.as_ref().map(|t| t.id);

    rsx! {
        div { class: "track-list",
            if tracks.is_empty() {
                p { class: "empty-note", "No tracks match." }
            }
            for track in tracks.iter() {
                div {
                    key: "{track.id}",
                    class: "track-row",
                    class: if current_id == Some(track.id) { "current" },
                    div {
                        class: "track-swatch",
                        style: "background: {track.color};",
                        PlayButton { track_id: track.id, class: "row-play".to_string() }
                    }
                    div { class: "track-meta",
                        span { class: "track-title", "{track.title}" }
                        span { class: "track-artist", "{track.artist}" }
                    }
                    if let Some(album) = track.album.as_ref() {
                        span { class: "track-album", "{album}" }
                    }
                    if let Some(genre) = track.genre.as_ref() {
                        span { class: "track-genre", "{genre}" }
                    }
                    span { class: "track-duration", "{format_time(track.duration_seconds)}" }
                }
            }
        }
    }
}
