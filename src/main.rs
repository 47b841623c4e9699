use dioxus::prelude::*;

mod components;
mod data;
mod player;

use components::{AppView, PlayerBridge, PlayerHandle, PlayerSnapshot, VisualizerFrame};
use player::{PlaybackState, SPECTRUM_BINS};

const APP_CSS: Asset = asset!("/assets/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let snapshot = use_signal(PlaybackState::default);
    let frames = use_signal(|| vec![0u8; SPECTRUM_BINS]);
    let handle = use_hook(|| PlayerHandle::new(data::demo_tracks()));

    use_context_provider(|| PlayerSnapshot(snapshot));
    use_context_provider(|| VisualizerFrame(frames));
    use_context_provider(|| handle.clone());

    rsx! {
        document::Meta { name: "theme-color", content: "#6366f1" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Stylesheet { href: APP_CSS }

        PlayerBridge {}
        Router::<AppView> {}
    }
}
