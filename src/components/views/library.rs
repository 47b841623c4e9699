use dioxus::prelude::*;

use crate::components::{use_player, Icon, TrackList};
use crate::player::Track;

#[derive(Clone, Copy, PartialEq)]
enum SortBy {
    Title,
    Artist,
    Duration,
}

#[component]
pub fn LibraryView() -> Element {
    let handle = use_player();
    let mut search_query = use_signal(String::new);
    let mut genre_filter = use_signal(|| "all".to_string());
    let mut sort_by = use_signal(|| SortBy::Title);

    let tracks = handle.playlist();

    let mut genres: Vec<String> = tracks.iter().filter_map(|t| t.genre.clone()).collect();
    genres.sort();
    genres.dedup();

    let query = search_query.read().to_lowercase();
    let genre = genre_filter.read().clone();
    let mut filtered: Vec<Track> = tracks
        .into_iter()
        .filter(|track| {
            let matches_query = query.is_empty()
                || track.title.to_lowercase().contains(&query)
                || track.artist.to_lowercase().contains(&query)
                || track
                    .album
                    .as_ref()
                    .map(|a| a.to_lowercase().contains(&query))
                    .unwrap_or(false);
            let matches_genre = genre == "all" || track.genre.as_deref() == Some(genre.as_str());
            matches_query && matches_genre
        })
        .collect();

    match *sort_by.read() {
        SortBy::Title => filtered.sort_by(|a, b| a.title.cmp(&b.title)),
        SortBy::Artist => filtered.sort_by(|a, b| a.artist.cmp(&b.artist)),
        SortBy::Duration => filtered.sort_by(|a, b| {
            a.duration_seconds
                .partial_cmp(&b.duration_seconds)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }

    rsx! {
        div { class: "page",
            header { class: "page-header",
                h1 { class: "page-title", "Library" }
                p { class: "page-subtitle", "{filtered.len()} tracks" }
            }

            div { class: "library-toolbar",
                div { class: "search-box",
                    Icon { name: "search".to_string(), class: "search-icon".to_string() }
                    input {
                        class: "search-input",
                        r#type: "search",
                        placeholder: "Search title, artist or album",
                        value: "{search_query}",
                        oninput: move |event| search_query.set(event.value()),
                    }
                }
                select {
                    class: "toolbar-select",
                    value: "{genre_filter}",
                    onchange: move |event| genre_filter.set(event.value()),
                    option { value: "all", "All genres" }
                    for genre in genres.iter() {
                        option { key: "{genre}", value: "{genre}", "{genre}" }
                    }
                }
                select {
                    class: "toolbar-select",
                    onchange: move |event| {
                        sort_by
                            .set(
                                match event.value().as_str() {
                                    "artist" => SortBy::Artist,
                                    "duration" => SortBy::Duration,
                                    _ => SortBy::Title,
                                },
                            )
                    },
                    option { value: "title", "Sort by title" }
                    option { value: "artist", "Sort by artist" }
                    option { value: "duration", "Sort by duration" }
                }
            }

            TrackList { tracks: filtered }
        }
    }
}
