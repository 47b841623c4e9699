use dioxus::prelude::*;

use crate::components::FullPlayer;

#[component]
pub fn PlayerView() -> Element {
    rsx! {
        div { class: "page player-page", FullPlayer {} }
    }
}
