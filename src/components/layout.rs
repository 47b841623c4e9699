use dioxus::prelude::*;

use crate::components::{AppView, Icon, MiniPlayer};

#[component]
pub fn Layout() -> Element {
    let current = use_route::<AppView>();

    let nav_class = |view: AppView| {
        if current == view {
            "nav-link active"
        } else {
            "nav-link"
        }
    };

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                Link { class: "brand", to: AppView::HomeView {},
                    Icon { name: "music".to_string(), class: "brand-icon".to_string() }
                    span { "Resonance" }
                }
                nav { class: "app-nav",
                    Link { class: nav_class(AppView::HomeView {}), to: AppView::HomeView {},
                        Icon { name: "home".to_string(), class: "nav-icon".to_string() }
                        span { "Home" }
                    }
                    Link { class: nav_class(AppView::LibraryView {}), to: AppView::LibraryView {},
                        Icon { name: "library".to_string(), class: "nav-icon".to_string() }
                        span { "Library" }
                    }
                    Link { class: nav_class(AppView::PlayerView {}), to: AppView::PlayerView {},
                        Icon { name: "play".to_string(), class: "nav-icon".to_string() }
                        span { "Now Playing" }
                    }
                }
            }
            main { class: "app-main", Outlet::<AppView> {} }
            MiniPlayer {}
        }
    }
}
