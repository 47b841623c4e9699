//! Route table. Every page renders inside [`Layout`], which carries the
//! top navigation and the docked mini player.

use dioxus::prelude::*;

use crate::components::views::{HomeView, LibraryView, PlayerView};
use crate::components::Layout;

#[derive(Debug, Clone, PartialEq, Routable)]
pub enum AppView {
    #[layout(Layout)]
    #[route("/")]
    HomeView {},
    #[route("/library")]
    LibraryView {},
    #[route("/player")]
    PlayerView {},
}
