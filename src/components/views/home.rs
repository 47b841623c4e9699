use dioxus::prelude::*;

use crate::components::{use_player, PlayButton, TrackList};

#[component]
pub fn HomeView() -> Element {
    let handle = use_player();
    let tracks = handle.playlist();
    let featured: Vec<_> = tracks.iter().take(4).cloned().collect();

    rsx! {
        div { class: "page",
            header { class: "page-header",
                h1 { class: "page-title", "Listen" }
                p { class: "page-subtitle", "Fresh picks from your catalog" }
            }

            section { class: "featured-grid",
                for track in featured.iter() {
                    div {
                        key: "{track.id}",
                        class: "featured-card",
                        style: "background: {track.color};",
                        div { class: "featured-overlay",
                            span { class: "featured-title", "{track.title}" }
                            span { class: "featured-artist", "{track.artist}" }
                        }
                        PlayButton { track_id: track.id, class: "featured-play".to_string() }
                    }
                }
            }

            section { class: "page-section",
                h2 { class: "section-title", "All tracks" }
                TrackList { tracks: tracks.clone() }
            }
        }
    }
}
